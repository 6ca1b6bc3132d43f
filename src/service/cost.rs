use crate::models::{CostedInvoice, InvoiceRecord};
use bigdecimal::BigDecimal;

/// 单行成本 = 采购价 * 出库数量, 任一缺失返回 None
pub fn line_cost(record: &InvoiceRecord) -> Option<BigDecimal> {
    match (&record.purchase_price, &record.issued_qty) {
        (Some(price), Some(qty)) => Some(price * qty),
        _ => None,
    }
}

pub fn apply_costs(records: Vec<InvoiceRecord>) -> Vec<CostedInvoice> {
    let costed: Vec<CostedInvoice> = records
        .into_iter()
        .map(|record| CostedInvoice {
            cost: line_cost(&record),
            record,
        })
        .collect();

    let undefined = costed.iter().filter(|c| c.cost.is_none()).count();
    if undefined > 0 {
        tracing::warn!("{} 行缺少采购价或数量, 不计入成本合计", undefined);
    }

    costed
}
