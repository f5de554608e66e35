//! # Invoice Lookup
//!
//! The two-call lookup sequence (customer, then open payments) and the
//! overdue/next-due selection rule applied to its result.

use crate::customer::Customer;
use crate::error::LookupResult;
use crate::payment::{format_display_date, Payment};
use crate::provider::BillingProvider;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Reduced view of one payment, as handed back to callers
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSummary {
    pub due_date: NaiveDate,
    pub value: Option<serde_json::Value>,
    pub payment_link: Option<String>,
}

impl PaymentSummary {
    pub fn from_payment(payment: &Payment) -> LookupResult<Self> {
        Ok(Self {
            due_date: payment.parsed_due_date()?,
            value: payment.value.clone(),
            payment_link: payment.payment_link().map(String::from),
        })
    }

    /// Due date rendered as dd/MM/yyyy
    pub fn display_due_date(&self) -> String {
        format_display_date(self.due_date)
    }
}

/// Result of a lookup. Exactly one per request.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Provider has no customer for the tax identifier
    CustomerNotFound,
    /// Customer exists but has nothing pending or overdue
    NoOpenPayments,
    /// Every overdue payment, in provider order. Pending ones are dropped.
    Overdue {
        customer: Customer,
        payments: Vec<PaymentSummary>,
    },
    /// Earliest-due pending payment (only when nothing is overdue)
    NextDue {
        customer: Customer,
        payment: PaymentSummary,
    },
}

impl LookupOutcome {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::CustomerNotFound => "customer_not_found",
            LookupOutcome::NoOpenPayments => "no_open_payments",
            LookupOutcome::Overdue { .. } => "overdue",
            LookupOutcome::NextDue { .. } => "next_due",
        }
    }
}

/// Apply the selection rule to a customer's open payments.
///
/// Any overdue payment wins over all pending ones. Otherwise the pending
/// payment with the earliest due date is picked; ties keep provider order.
pub fn select_payments(customer: Customer, payments: &[Payment]) -> LookupResult<LookupOutcome> {
    let (overdue, pending): (Vec<&Payment>, Vec<&Payment>) = payments
        .iter()
        .filter(|p| p.is_overdue() || p.is_pending())
        .partition(|p| p.is_overdue());

    if !overdue.is_empty() {
        let payments = overdue
            .into_iter()
            .map(PaymentSummary::from_payment)
            .collect::<LookupResult<Vec<_>>>()?;
        return Ok(LookupOutcome::Overdue { customer, payments });
    }

    let dated = pending
        .into_iter()
        .map(|p| p.parsed_due_date().map(|date| (date, p)))
        .collect::<LookupResult<Vec<_>>>()?;

    match dated.into_iter().min_by_key(|(date, _)| *date) {
        Some((_, next)) => Ok(LookupOutcome::NextDue {
            customer,
            payment: PaymentSummary::from_payment(next)?,
        }),
        None => Ok(LookupOutcome::NoOpenPayments),
    }
}

/// Run the full lookup against a provider: resolve the customer, list its
/// open payments, then select.
#[instrument(skip(provider), fields(provider_name = provider.provider_name()))]
pub async fn lookup_invoices(
    provider: &dyn BillingProvider,
    cpf_cnpj: &str,
) -> LookupResult<LookupOutcome> {
    info!("Looking up customer");
    let Some(customer) = provider.find_customer(cpf_cnpj).await? else {
        info!("No customer found");
        return Ok(LookupOutcome::CustomerNotFound);
    };

    info!(customer_id = %customer.id, "Listing pending/overdue payments");
    let payments = provider.list_open_payments(&customer.id).await?;
    debug!(count = payments.len(), "Open payments received");

    if payments.is_empty() {
        return Ok(LookupOutcome::NoOpenPayments);
    }

    let outcome = select_payments(customer, &payments)?;
    info!(outcome = outcome.kind(), "Lookup complete");
    Ok(outcome)
}
