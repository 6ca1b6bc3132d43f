pub mod aggregator;
pub mod cost;
pub mod export;
pub mod normalizer;
pub mod notifier;
pub mod pipeline;
pub mod renderer;
pub mod source;

pub use notifier::{FileMailer, Mailer, OutgoingReport, SmtpMailer};
pub use pipeline::CostReportJob;
pub use source::{InvoiceSource, MySqlInvoiceSource, StaticInvoiceSource};
