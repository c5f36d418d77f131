pub mod invoice;
pub mod project;
pub mod summary;
pub mod supplier;

pub use invoice::{Invoice, InvoiceRow, InvoiceStatus, TRACKED_STATUSES};
pub use project::{ContractRef, ContractScope, ProjectKind, ProjectRef};
pub use summary::{DebtReport, DebtSummary, DebtTotals, SortDirection, SortField};
pub use supplier::{Supplier, SupplierKind, SupplierRef, SupplierType};
