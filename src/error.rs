use thiserror::Error;

/// 报表任务错误
///
/// 取数失败与发送失败都会终止本次运行, 不存在部分成功.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("data fetch failed: {0}")]
    Fetch(#[from] sqlx::Error),

    #[error("report rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("mail delivery failed: {0}")]
    Delivery(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// 取数阶段的错误 (未发送任何邮件)
    pub fn is_fetch(&self) -> bool {
        matches!(self, ReportError::Fetch(_))
    }
}
