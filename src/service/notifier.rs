use crate::config::EmailConfig;
use crate::error::ReportError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::PathBuf;

/// 待发送的报表邮件
#[derive(Debug, Clone)]
pub struct OutgoingReport {
    pub subject: String,
    pub html: String,
    /// (文件名, 内容)
    pub attachment: Option<(String, Vec<u8>)>,
}

/// 邮件主题, 时间为 IST 生成时间
pub fn report_subject(generated_at: &DateTime<FixedOffset>) -> String {
    format!("Daily Cost Report - {}", generated_at.format("%Y_%m_%d_%H_%M"))
}

/// 报表投递
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, report: OutgoingReport) -> Result<(), ReportError>;
}

/// CSV 附件类型 (lettre 未提供 text/csv 常量)
pub fn csv_content_type() -> Result<ContentType, ReportError> {
    Ok(ContentType::parse("text/csv")?)
}

/// 构建 multipart 邮件: HTML 正文 + 可选 CSV 附件, 信封收件人为 To ∪ Cc
pub fn build_message(config: &EmailConfig, report: OutgoingReport) -> Result<Message, ReportError> {
    let mut builder = Message::builder()
        .from(config.sender().parse::<Mailbox>()?)
        .subject(report.subject);

    for addr in config.to.iter().filter(|a| !a.trim().is_empty()) {
        builder = builder.to(addr.trim().parse::<Mailbox>()?);
    }
    for addr in config.cc.iter().filter(|a| !a.trim().is_empty()) {
        builder = builder.cc(addr.trim().parse::<Mailbox>()?);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::html(report.html));
    if let Some((file_name, bytes)) = report.attachment {
        body = body.singlepart(Attachment::new(file_name).body(bytes, csv_content_type()?));
    }

    Ok(builder.multipart(body)?)
}

/// STARTTLS + 用户名密码认证的 SMTP 投递, 失败不重试
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, report: OutgoingReport) -> Result<(), ReportError> {
        let subject = report.subject.clone();
        let message = build_message(&self.config, report)?;
        let recipients = message.envelope().to().len();

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| ReportError::Delivery(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        match transport.send(message).await {
            Ok(_) => {
                tracing::info!("✓ 邮件已发送: {} ({} 个收件人)", subject, recipients);
                Ok(())
            }
            Err(e) => {
                tracing::error!("✗ 邮件发送失败: {:?}", e);
                Err(ReportError::Delivery(e.to_string()))
            }
        }
    }
}

/// 预览: 只把正文写入本地文件, 不发送
pub struct FileMailer {
    path: PathBuf,
}

impl FileMailer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, report: OutgoingReport) -> Result<(), ReportError> {
        tokio::fs::write(&self.path, report.html.as_bytes()).await?;
        tracing::info!("预览已写入 {} ({})", self.path.display(), report.subject);
        Ok(())
    }
}
