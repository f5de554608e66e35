//! # Request Handlers
//!
//! Axum request handlers for the invoice lookup API, plus the typed response
//! variants every request ends in.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use boleto_core::{lookup_invoices, LookupError, LookupOutcome, PaymentSummary};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Opaque marker returned for bad input and for every upstream failure
pub const ERROR_MARKER: &str = "erroAsaas";

/// Marker returned when nothing was found
pub const NOT_FOUND_MARKER: &str = "NaoEncontrado";

pub const MISSING_TOKEN_MESSAGE: &str = "Token de autorização é obrigatório.";
pub const INVALID_TOKEN_MESSAGE: &str = "Token de autorização inválido.";

// =============================================================================
// Response Types
// =============================================================================

/// Caller-side failures, each with a fixed status and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    /// `cpfCnpj` absent or empty (400)
    MissingTaxId,
    /// No `Bearer` credential (401)
    MissingToken,
    /// Credential does not match the configured secret (403)
    InvalidToken,
}

/// Which absence a not-found response reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// No customer for the tax identifier (404)
    Customer,
    /// Customer exists, nothing pending or overdue (200)
    OpenPayments,
}

/// Every response the lookup endpoint can produce
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    ClientError(ClientError),
    NotFound(Absence),
    OverdueList(OverdueListBody),
    NextDue(NextDueBody),
    ServerError,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// One boleto as shown to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoletoSummary {
    /// Due date, dd/MM/yyyy
    pub vencimento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor: Option<Value>,
    #[serde(rename = "linkPagamento", skip_serializing_if = "Option::is_none")]
    pub link_pagamento: Option<String>,
}

impl From<PaymentSummary> for BoletoSummary {
    fn from(summary: PaymentSummary) -> Self {
        Self {
            vencimento: summary.display_due_date(),
            valor: summary.value,
            link_pagamento: summary.payment_link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverdueListBody {
    pub cliente: Option<String>,
    #[serde(rename = "boletosVencidos")]
    pub boletos_vencidos: Vec<BoletoSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextDueBody {
    pub cliente: Option<String>,
    #[serde(flatten)]
    pub boleto: BoletoSummary,
}

impl From<LookupOutcome> for LookupResponse {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::CustomerNotFound => LookupResponse::NotFound(Absence::Customer),
            LookupOutcome::NoOpenPayments => LookupResponse::NotFound(Absence::OpenPayments),
            LookupOutcome::Overdue { customer, payments } => {
                LookupResponse::OverdueList(OverdueListBody {
                    cliente: customer.name,
                    boletos_vencidos: payments.into_iter().map(BoletoSummary::from).collect(),
                })
            }
            LookupOutcome::NextDue { customer, payment } => LookupResponse::NextDue(NextDueBody {
                cliente: customer.name,
                boleto: payment.into(),
            }),
        }
    }
}

/// The single boundary where failures lose their detail
impl From<LookupError> for LookupResponse {
    fn from(err: LookupError) -> Self {
        error!(transport = err.is_transport(), "Lookup failed: {}", err);
        LookupResponse::ServerError
    }
}

impl LookupResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupResponse::ClientError(ClientError::MissingTaxId) => StatusCode::BAD_REQUEST,
            LookupResponse::ClientError(ClientError::MissingToken) => StatusCode::UNAUTHORIZED,
            LookupResponse::ClientError(ClientError::InvalidToken) => StatusCode::FORBIDDEN,
            LookupResponse::NotFound(Absence::Customer) => StatusCode::NOT_FOUND,
            LookupResponse::NotFound(Absence::OpenPayments) => StatusCode::OK,
            LookupResponse::OverdueList(_) | LookupResponse::NextDue(_) => StatusCode::OK,
            LookupResponse::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LookupResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            LookupResponse::ClientError(kind) => {
                let error = match kind {
                    ClientError::MissingTaxId => ERROR_MARKER,
                    ClientError::MissingToken => MISSING_TOKEN_MESSAGE,
                    ClientError::InvalidToken => INVALID_TOKEN_MESSAGE,
                };
                (status, Json(ErrorBody { error })).into_response()
            }
            LookupResponse::NotFound(_) => (
                status,
                Json(MessageBody {
                    message: NOT_FOUND_MARKER,
                }),
            )
                .into_response(),
            LookupResponse::OverdueList(body) => (status, Json(body)).into_response(),
            LookupResponse::NextDue(body) => (status, Json(body)).into_response(),
            LookupResponse::ServerError => (
                status,
                Json(ErrorBody {
                    error: ERROR_MARKER,
                }),
            )
                .into_response(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "consulta-boletos",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Look up a customer's open boletos by CPF/CNPJ.
///
/// Authorization has already run as middleware. The body is read raw so a
/// missing, non-JSON or malformed body maps to the same 400 as a missing field.
#[instrument(skip(state, headers, body), fields(request_id = %Uuid::new_v4()))]
pub async fn consulta_boletos(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> LookupResponse {
    let tax_id = is_json(&headers).then(|| extract_tax_id(&body)).flatten();
    let Some(cpf_cnpj) = tax_id else {
        warn!("Request without cpfCnpj");
        return LookupResponse::ClientError(ClientError::MissingTaxId);
    };

    info!("Invoice lookup for cpfCnpj={}", cpf_cnpj);

    match lookup_invoices(state.provider.as_ref(), &cpf_cnpj).await {
        Ok(outcome) => outcome.into(),
        Err(err) => err.into(),
    }
}

/// Body is only read as JSON when declared `application/json`
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Pull `cpfCnpj` out of a JSON body.
///
/// Presence is the only check: a non-empty string, or a non-zero number
/// rendered as its JSON text.
fn extract_tax_id(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.get("cpfCnpj")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
