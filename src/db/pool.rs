use crate::config::DatabaseConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use std::time::Duration;

/// 连接参数
pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
        // 慢查询日志阈值
        .log_slow_statements(
            tracing::log::LevelFilter::Warn,
            Duration::from_secs(config.slow_statement_secs),
        )
}

/// 创建数据库连接池
///
/// 每次运行只使用一个连接, 取数完成后由调用方关闭.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(connect_options(config))
        .await
}
