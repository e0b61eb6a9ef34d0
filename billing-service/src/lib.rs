//! Hospital billing engine
//!
//! In-memory procedure catalogue, surgeries, invoices and patients with:
//! - search/filter over every list ([`ListQuery`])
//! - aggregate statistics and the dashboard summary
//! - complexity-based surgery pricing
//! - age calculation against a reference date
//! - status/complexity to badge mapping for list rows
//!
//! ```
//! use billing_service::{BillingService, BillingSettings, ListQuery};
//!
//! let service = BillingService::seeded(BillingSettings::default()).unwrap();
//! let overdue = service.list_invoices(&ListQuery::filter("Vencida"));
//! assert_eq!(overdue.len(), 1);
//! assert_eq!(service.invoice_stats().overdue_count, 1);
//! ```

pub mod age;
pub mod error;
pub mod filter;
pub mod models;
pub mod presentation;
pub mod pricing;
pub mod reporting;
pub mod seed;
pub mod service;
pub mod settings;
pub mod store;

pub use age::age_on;
pub use error::{BillingError, BillingResult};
pub use filter::{ListQuery, Searchable, ALL_FILTER};
pub use models::*;
pub use presentation::{Badge, Presentable, Presented, RowBadges};
pub use pricing::{final_value, MAX_CURRENCY};
pub use reporting::*;
pub use service::BillingService;
pub use settings::{AggregatePolicy, BillingSettings};
pub use store::BillingStore;
