use crate::config::AppConfig;
use crate::error::ReportError;
use crate::models::RunSummary;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// 响应体
#[derive(Debug, Serialize)]
pub struct RunReportResponse {
    pub success: bool,
    pub message: String,
    pub summary: Option<RunSummary>,
}

/// 取数失败视为上游 (数据库) 故障, 其余为内部错误
pub fn status_for(err: &ReportError) -> StatusCode {
    if err.is_fetch() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 触发一次报表 (供外部调度器调用)
pub async fn run_report(State(config): State<Arc<AppConfig>>) -> Response {
    match crate::handler(&config).await {
        Ok(summary) => {
            let response = RunReportResponse {
                success: true,
                message: format!("Report sent: {}", summary.subject),
                summary: Some(summary),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Report run failed: {}", e);
            let status = status_for(&e);
            let response = RunReportResponse {
                success: false,
                message: format!("Error: {}", e),
                summary: None,
            };
            (status, Json(response)).into_response()
        }
    }
}
