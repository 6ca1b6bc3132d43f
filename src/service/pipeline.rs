use crate::error::ReportError;
use crate::models::RunSummary;
use crate::rules::ReportRules;
use crate::service::aggregator::build_report;
use crate::service::cost::apply_costs;
use crate::service::export::{csv_file_name, export_to_csv};
use crate::service::normalizer::Normalizer;
use crate::service::notifier::{report_subject, Mailer, OutgoingReport};
use crate::service::renderer::render_report;
use crate::service::source::InvoiceSource;
use chrono::{DateTime, FixedOffset, Utc};

/// IST 偏移 (UTC+05:30)
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// IST 时区
pub fn ist_offset() -> FixedOffset {
    // 常量偏移在 ±24h 范围内, east_opt 不会返回 None
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within bounds")
}

/// 当前 IST 时间
pub fn ist_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist_offset())
}

/// 每日成本报表任务: 取数 -> 规范化 -> 计算成本 -> 汇总 -> 渲染 -> 发送
pub struct CostReportJob<S, M> {
    source: S,
    mailer: M,
    normalizer: Normalizer,
    attach_csv: bool,
}

impl<S: InvoiceSource, M: Mailer> CostReportJob<S, M> {
    pub fn new(source: S, mailer: M, rules: &ReportRules, attach_csv: bool) -> Self {
        Self {
            source,
            mailer,
            normalizer: Normalizer::new(rules),
            attach_csv,
        }
    }

    pub async fn run(&self) -> Result<RunSummary, ReportError> {
        self.run_at(ist_now()).await
    }

    /// 以指定生成时间执行一次完整流程
    pub async fn run_at(&self, generated_at: DateTime<FixedOffset>) -> Result<RunSummary, ReportError> {
        // 1. 取数, 失败则整次运行中止, 不发送任何邮件
        let records = match self.source.fetch_invoices().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("取数失败, 本次报表中止: {}", e);
                return Err(ReportError::Fetch(e));
            }
        };
        let fetched_rows = records.len();

        // 2. 规范化 + 3. 成本
        let costed = apply_costs(self.normalizer.normalize(records));
        let reported_rows = costed.len();

        // 4. 汇总
        let report = build_report(&costed, generated_at);
        if report.is_empty() {
            tracing::warn!("没有符合条件的数据, 发送空报表");
        }

        // 5. 渲染
        let html = render_report(&report)?;
        let attachment = if self.attach_csv {
            Some((csv_file_name(&report), export_to_csv(&report)?))
        } else {
            None
        };

        // 6. 发送
        let subject = report_subject(&report.generated_at);
        self.mailer
            .send(OutgoingReport {
                subject: subject.clone(),
                html,
                attachment,
            })
            .await?;

        let summary = RunSummary {
            fetched_rows,
            reported_rows,
            groups: report.groups.len(),
            subject,
        };
        tracing::info!("报表完成: {:?}", summary);
        Ok(summary)
    }
}
