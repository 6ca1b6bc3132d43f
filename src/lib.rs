pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod rules;
pub mod service;

pub use config::AppConfig;
pub use error::ReportError;
pub use models::RunSummary;
pub use service::CostReportJob;

use service::{MySqlInvoiceSource, SmtpMailer};

/// 任务入口: 由外部调度器按报表周期调用, 配置由调用方解析后传入
pub async fn handler(config: &AppConfig) -> Result<RunSummary, ReportError> {
    let job = CostReportJob::new(
        MySqlInvoiceSource::new(config.database.clone()),
        SmtpMailer::new(config.email.clone()),
        &config.report.rules,
        config.report.attach_csv,
    );
    job.run().await
}
