//! # Payment Types
//!
//! Invoice ("cobrança") records as the billing provider returns them, plus the
//! due-date helpers used when building summaries.

use crate::error::{LookupError, LookupResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display format for due dates (dd/MM/yyyy)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Payment status as reported by the provider.
///
/// Only `PENDING` and `OVERDUE` take part in selection; everything else is
/// carried verbatim and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Overdue,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Overdue => "OVERDUE",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Other(String::new())
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => PaymentStatus::Pending,
            "OVERDUE" => PaymentStatus::Overdue,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A payment as returned by the billing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Provider-assigned identifier (e.g., "pay_080225913252")
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Owning customer identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: String,

    /// Due date, ISO-8601 as sent by the provider. Empty when the provider
    /// sent none; only payments that take part in selection need one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,

    /// Monetary value, passed through untouched. `None` only when the key is
    /// absent; an explicit `null` is kept as `Value::Null`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PaymentStatus,

    /// Hosted invoice page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_url: Option<String>,

    /// Bank slip (boleto) PDF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_slip_url: Option<String>,
}

impl Payment {
    pub fn new(
        id: impl Into<String>,
        due_date: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            customer: String::new(),
            due_date: due_date.into(),
            value: None,
            status,
            invoice_url: None,
            bank_slip_url: None,
        }
    }

    /// Builder: set value
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: set invoice URL
    pub fn with_invoice_url(mut self, url: impl Into<String>) -> Self {
        self.invoice_url = Some(url.into());
        self
    }

    /// Builder: set bank slip URL
    pub fn with_bank_slip_url(mut self, url: impl Into<String>) -> Self {
        self.bank_slip_url = Some(url.into());
        self
    }

    pub fn is_overdue(&self) -> bool {
        self.status == PaymentStatus::Overdue
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// First non-empty of `invoiceUrl`, then `bankSlipUrl`
    pub fn payment_link(&self) -> Option<&str> {
        [&self.invoice_url, &self.bank_slip_url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    pub fn parsed_due_date(&self) -> LookupResult<NaiveDate> {
        parse_due_date(&self.due_date)
    }
}

/// `null` reads as the field's default, same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parse an ISO-8601 due date without any timezone conversion.
///
/// Accepts a plain date, a local date-time, or an RFC 3339 timestamp; for the
/// latter the calendar date is taken in its own offset.
pub fn parse_due_date(raw: &str) -> LookupResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(LookupError::InvalidDate(raw.to_string()))
}

/// Render a date as dd/MM/yyyy
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
