use crate::models::InvoiceRecord;
use sqlx::MySqlPool;

/// 下游成本查询
///
/// 每个 (工单号, 发票号) 只保留最新开票日期的记录, 再左连接配件/工时/车辆/客户/门店等维度.
pub const DOWNSTREAM_COST_SQL: &str = r#"
WITH latest_invoice_entries_tb AS (
    SELECT
        r.RONumber,
        i.InvoiceNo,
        MAX(i.InvoiceDate) AS LatestInvoiceDate
    FROM Service_ROInvoice i
    LEFT JOIN Service_ROForm r ON i.ROID = r.Id AND r.isdeleted = 0
    GROUP BY r.RONumber, i.InvoiceNo
)
SELECT DISTINCT
    CAST(i.InvoiceNo AS CHAR) AS invoice_no,
    c.name AS company_name,
    l.name AS location_name,
    CAST(r.RONumber AS CHAR) AS ro_number,
    CAST(i.InvoiceDate AS DATETIME) AS invoice_date,
    cu.CustomerName AS customer_name,
    m.name AS model_name,
    va.name AS variant_name,
    v.Vin AS vin,
    ca.name AS group_name,
    pr.product_code AS item_name,
    CAST(pr.hsn_code AS CHAR) AS hsn_code,
    CAST(la.SACCode AS CHAR) AS sac_code,
    lm.LabourDesc AS labour_desc,
    CAST(p.TaxRate AS DECIMAL(18, 4)) AS tax_rate,
    CAST(p.IssuedQty AS DECIMAL(18, 4)) AS issued_qty,
    CAST(pr.purchase_price AS DECIMAL(18, 4)) AS purchase_price,
    CAST(r.total_labour_taxable_amount AS DECIMAL(18, 4)) AS labour_taxable_amount,
    CAST(pr.MRP * p.IssuedQty AS DECIMAL(18, 4)) AS mrp,
    CAST((pr.MRP * p.IssuedQty) / ((100 + p.TaxRate) / 100) AS DECIMAL(18, 4)) AS mrp_without_tax,
    CAST(p.Discount AS DECIMAL(18, 4)) AS discount,
    CAST(p.TotalAmount / ((100 + p.TaxRate) / 100) AS DECIMAL(18, 4)) AS without_gst_sell_amount,
    CAST(i.GrandTotal AS DECIMAL(18, 4)) AS grand_total,
    CAST(r.Ro_Type AS CHAR) AS ro_type
FROM Service_ROInvoice i
LEFT JOIN Service_ROForm r ON i.ROID = r.Id AND r.isdeleted = 0
LEFT JOIN Service_tblAccdetails p ON p.ROID = i.ROID AND p.isdeleted = 0
LEFT JOIN Service_tblLabourDetails la ON la.RoId = r.Id AND la.isdeleted = 0
LEFT JOIN Service_lstLabourMaster lm ON lm.id = la.labourId AND lm.isdeleted = 0
LEFT JOIN companies c ON c.Id = r.Company_Id
LEFT JOIN locations l ON l.Id = r.Location_Id
LEFT JOIN LG_CustomerDetails_Log cu ON cu.id = r.CustomerLog_id
LEFT JOIN Service_VehicleMaster v ON v.ID = r.Vehicle_Id
LEFT JOIN models m ON m.Id = v.Model_id
LEFT JOIN variants va ON va.Id = v.Varient_Id
LEFT JOIN products pr ON pr.id = p.ProductId
LEFT JOIN categories ca ON ca.id = pr.category_id
JOIN latest_invoice_entries_tb lie
    ON i.InvoiceNo = lie.InvoiceNo AND i.InvoiceDate = lie.LatestInvoiceDate
"#;

/// 执行下游成本查询
pub async fn fetch_invoice_records(pool: &MySqlPool) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
    tracing::debug!("开始执行下游成本查询...");
    let start_time = std::time::Instant::now();

    let result = sqlx::query_as::<_, InvoiceRecord>(DOWNSTREAM_COST_SQL)
        .fetch_all(pool)
        .await;

    match result {
        Ok(records) => {
            tracing::info!("✓ 查询成功, {} 行, 耗时: {:?}", records.len(), start_time.elapsed());
            Ok(records)
        }
        Err(e) => {
            tracing::error!("✗ 查询失败, 耗时: {:?}, 错误: {:?}", start_time.elapsed(), e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_aliases_match_record_fields() {
        let aliases = [
            "invoice_no", "company_name", "location_name", "ro_number", "invoice_date",
            "customer_name", "model_name", "variant_name", "vin", "group_name", "item_name",
            "hsn_code", "sac_code", "labour_desc", "tax_rate", "issued_qty", "purchase_price",
            "labour_taxable_amount", "mrp", "mrp_without_tax", "discount",
            "without_gst_sell_amount", "grand_total", "ro_type",
        ];
        for alias in aliases {
            assert!(
                DOWNSTREAM_COST_SQL.contains(&format!("AS {}", alias)),
                "missing column alias {}",
                alias
            );
        }
    }

    #[test]
    fn query_keeps_latest_invoice_only() {
        assert!(DOWNSTREAM_COST_SQL.contains("MAX(i.InvoiceDate) AS LatestInvoiceDate"));
        assert!(DOWNSTREAM_COST_SQL.contains("i.InvoiceDate = lie.LatestInvoiceDate"));
    }
}
