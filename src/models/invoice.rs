use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 维修发票明细行 (发票 x 工单 x 配件/工时行)
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_no: Option<String>,
    pub company_name: Option<String>,
    pub location_name: Option<String>,
    pub ro_number: Option<String>,
    pub invoice_date: Option<NaiveDateTime>,
    pub customer_name: Option<String>,
    pub model_name: Option<String>,
    pub variant_name: Option<String>,
    pub vin: Option<String>,
    pub group_name: Option<String>,
    pub item_name: Option<String>,
    pub hsn_code: Option<String>,
    pub sac_code: Option<String>,
    pub labour_desc: Option<String>,
    pub tax_rate: Option<BigDecimal>,
    pub issued_qty: Option<BigDecimal>,
    pub purchase_price: Option<BigDecimal>,
    pub labour_taxable_amount: Option<BigDecimal>,
    pub mrp: Option<BigDecimal>,
    pub mrp_without_tax: Option<BigDecimal>,
    pub discount: Option<BigDecimal>,
    pub without_gst_sell_amount: Option<BigDecimal>,
    pub grand_total: Option<BigDecimal>,
    pub ro_type: Option<String>,
}

/// 附带成本的明细行
#[derive(Debug, Clone, Serialize)]
pub struct CostedInvoice {
    pub record: InvoiceRecord,
    /// purchase_price * issued_qty, 任一缺失时为 None
    pub cost: Option<BigDecimal>,
}
