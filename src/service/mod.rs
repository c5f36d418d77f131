pub mod debt;
pub mod filter;
pub mod resolution;
pub mod rollup;

pub use debt::DebtService;
pub use filter::{filter_invoices, load_scope};
pub use resolution::{resolve_invoices, ResolvedInvoice, ResolvedSupplier, SupplierDirectory};
pub use rollup::{rollup, sort_summaries};
