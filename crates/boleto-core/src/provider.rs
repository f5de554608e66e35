//! # Billing Provider Trait
//!
//! The seam between the lookup flow and whichever billing service owns the
//! customer and invoice records.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  BillingProvider (trait)                    │
//! │  ├── find_customer()                                        │
//! │  ├── list_open_payments()                                   │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                ┌───────────┴───────────┐
//!        ┌───────┴───────┐       ┌───────┴───────┐
//!        │  AsaasClient  │       │  test stubs   │
//!        └───────────────┘       └───────────────┘
//! ```

use crate::customer::Customer;
use crate::error::LookupResult;
use crate::payment::Payment;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Resolve a customer by tax identifier.
    ///
    /// Returns the first match the provider reports, or `None` when the
    /// provider has no customer for it.
    async fn find_customer(&self, cpf_cnpj: &str) -> LookupResult<Option<Customer>>;

    /// List the customer's `PENDING` and `OVERDUE` payments, in provider order.
    ///
    /// An absent list is reported as empty.
    async fn list_open_payments(&self, customer_id: &str) -> LookupResult<Vec<Payment>>;

    /// Provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type SharedBillingProvider = Arc<dyn BillingProvider>;
