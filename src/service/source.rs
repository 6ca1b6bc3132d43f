use crate::config::DatabaseConfig;
use crate::db::{create_pool, queries};
use crate::models::InvoiceRecord;
use async_trait::async_trait;

/// 发票明细数据源
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>, sqlx::Error>;
}

/// MySQL 数据源: 每次取数建立一个连接, 查询结束即关闭
pub struct MySqlInvoiceSource {
    config: DatabaseConfig,
}

impl MySqlInvoiceSource {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl InvoiceSource for MySqlInvoiceSource {
    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
        let pool = create_pool(&self.config).await?;
        tracing::info!(
            "Database connected: {}:{}/{}",
            self.config.host, self.config.port, self.config.database
        );

        let result = queries::fetch_invoice_records(&pool).await;
        pool.close().await;
        result
    }
}

/// 内存数据源, 用于预览与测试
pub struct StaticInvoiceSource {
    records: Vec<InvoiceRecord>,
}

impl StaticInvoiceSource {
    pub fn new(records: Vec<InvoiceRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl InvoiceSource for StaticInvoiceSource {
    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
        Ok(self.records.clone())
    }
}
