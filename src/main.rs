use axum::{routing::{get, post}, Router};
use service_cost_report::service::{FileMailer, MySqlInvoiceSource};
use service_cost_report::{api, handler, AppConfig, CostReportJob};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

const USAGE: &str = "usage: service-cost-report [run | serve | preview <file.html>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Loaded config: {:?}", config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("run") => {
            let summary = handler(&config).await?;
            info!("Report sent: {} ({} rows)", summary.subject, summary.reported_rows);
        }
        Some("serve") => serve(config).await?,
        Some("preview") => {
            let path = args.get(1).cloned().unwrap_or_else(|| "cost_report.html".to_string());
            let job = CostReportJob::new(
                MySqlInvoiceSource::new(config.database.clone()),
                FileMailer::new(path),
                &config.report.rules,
                false,
            );
            job.run().await?;
        }
        Some(other) => {
            return Err(format!("unknown command '{}'\n{}", other, USAGE).into());
        }
    }

    Ok(())
}

/// HTTP 触发入口
async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/report/run", post(api::run_report))
        .with_state(Arc::new(config))
        .layer(ServiceBuilder::new());

    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /health");
    info!("  POST /api/report/run  - build and send the daily cost report");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
