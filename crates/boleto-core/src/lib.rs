//! # boleto-core
//!
//! Core types and rules for the consulta-boletos invoice lookup.
//!
//! This crate provides:
//! - `BillingProvider` trait for the external billing service
//! - `Customer` and `Payment` provider records
//! - `select_payments` / `lookup_invoices` for the overdue/next-due rule
//! - `LookupError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use boleto_core::{lookup_invoices, LookupOutcome};
//!
//! match lookup_invoices(provider.as_ref(), "24971563792").await? {
//!     LookupOutcome::Overdue { customer, payments } => { /* list every overdue boleto */ }
//!     LookupOutcome::NextDue { customer, payment } => { /* earliest pending boleto */ }
//!     LookupOutcome::NoOpenPayments | LookupOutcome::CustomerNotFound => {}
//! }
//! ```

pub mod customer;
pub mod error;
pub mod lookup;
pub mod payment;
pub mod provider;

// Re-exports for convenience
pub use customer::Customer;
pub use error::{LookupError, LookupResult};
pub use lookup::{lookup_invoices, select_payments, LookupOutcome, PaymentSummary};
pub use payment::{format_display_date, parse_due_date, Payment, PaymentStatus};
pub use provider::{BillingProvider, SharedBillingProvider};
