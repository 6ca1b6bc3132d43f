pub mod invoice;
pub mod report;

pub use invoice::{CostedInvoice, InvoiceRecord};
pub use report::{AggregationKey, BrandReport, CostReport, GroupReport, LocationCost, RunSummary};
