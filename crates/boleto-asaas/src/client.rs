//! # Asaas Client
//!
//! `BillingProvider` implementation over the Asaas REST API (v3).
//! Two read-only endpoints are used: customer search by CPF/CNPJ and the
//! payment listing filtered to open statuses.

use crate::config::AsaasConfig;
use async_trait::async_trait;
use boleto_core::{BillingProvider, Customer, LookupError, LookupResult, Payment};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Status filter sent with the payment listing
pub const OPEN_PAYMENT_STATUSES: &str = "PENDING,OVERDUE";

/// Asaas API client
///
/// Holds one pooled `reqwest::Client` with the access token baked into its
/// default headers.
pub struct AsaasClient {
    config: AsaasConfig,
    client: Client,
}

impl AsaasClient {
    /// Create a new Asaas client
    pub fn new(config: AsaasConfig) -> LookupResult<Self> {
        let mut access_token = HeaderValue::from_str(&config.access_token).map_err(|_| {
            LookupError::Configuration("ASAAS_API_TOKEN is not a valid header value".to_string())
        })?;
        access_token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("access_token", access_token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("consulta-boletos/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| LookupError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> LookupResult<Self> {
        let config = AsaasConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &AsaasConfig {
        &self.config
    }

    /// GET a JSON document from the API
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> LookupResult<T> {
        let url = self.config.endpoint(path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        debug!("Asaas response: path={}, status={}, body={}", path, status, body);

        if !status.is_success() {
            error!("Asaas API error: status={}, body={}", status, body);

            // Asaas reports failures as {"errors":[{"code","description"}]}
            if let Ok(error_response) = serde_json::from_str::<AsaasErrorResponse>(&body) {
                if let Some(first) = error_response.errors.into_iter().next() {
                    return Err(LookupError::Provider {
                        status: status.as_u16(),
                        body: format!("{}: {}", first.code, first.description),
                    });
                }
            }

            return Err(LookupError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            LookupError::Serialization(format!("Failed to parse Asaas response for {path}: {e}"))
        })
    }
}

#[async_trait]
impl BillingProvider for AsaasClient {
    #[instrument(skip(self))]
    async fn find_customer(&self, cpf_cnpj: &str) -> LookupResult<Option<Customer>> {
        let list: CustomerList = self
            .get_json("/customers", &[("cpfCnpj", cpf_cnpj)])
            .await?;

        // Only the first match is used, so only the first is decoded
        let Some(first) = list.data.into_iter().next() else {
            return Ok(None);
        };

        let customer = serde_json::from_value(first).map_err(|e| {
            LookupError::Serialization(format!("Failed to parse Asaas customer: {e}"))
        })?;
        Ok(Some(customer))
    }

    #[instrument(skip(self))]
    async fn list_open_payments(&self, customer_id: &str) -> LookupResult<Vec<Payment>> {
        let list: PaymentList = self
            .get_json(
                "/payments",
                &[("customer", customer_id), ("status", OPEN_PAYMENT_STATUSES)],
            )
            .await?;

        Ok(list.data.unwrap_or_default())
    }

    fn provider_name(&self) -> &'static str {
        "asaas"
    }
}

// =============================================================================
// Asaas API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CustomerList {
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PaymentList {
    #[serde(default)]
    data: Option<Vec<Payment>>,
}

#[derive(Debug, Deserialize)]
struct AsaasErrorResponse {
    #[serde(default)]
    errors: Vec<AsaasError>,
}

#[derive(Debug, Deserialize)]
struct AsaasError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use boleto_core::{lookup_invoices, LookupOutcome, PaymentStatus};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AsaasClient {
        AsaasClient::new(AsaasConfig::new(server.uri(), "$aact_test")).unwrap()
    }

    #[tokio::test]
    async fn test_find_customer_sends_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .and(query_param("cpfCnpj", "24971563792"))
            .and(header("access_token", "$aact_test"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "hasMore": false,
                "totalCount": 2,
                "data": [
                    { "id": "cus_1", "name": "Marcelo Almeida", "cpfCnpj": "24971563792" },
                    { "id": "cus_2", "name": "Marcelo A.", "cpfCnpj": "24971563792" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let customer = client_for(&server)
            .find_customer("24971563792")
            .await
            .unwrap()
            .unwrap();

        // First match wins
        assert_eq!(customer.id, "cus_1");
        assert_eq!(customer.name.as_deref(), Some("Marcelo Almeida"));
    }

    #[tokio::test]
    async fn test_find_customer_decodes_first_match_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": "cus_1", "name": null },
                    { "id": 42, "name": ["not", "a", "customer"] }
                ]
            })))
            .mount(&server)
            .await;

        let customer = client_for(&server)
            .find_customer("24971563792")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(customer.id, "cus_1");
        assert_eq!(customer.name, None);
    }

    #[tokio::test]
    async fn test_find_customer_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let customer = client_for(&server).find_customer("000").await.unwrap();
        assert!(customer.is_none());
    }

    #[tokio::test]
    async fn test_find_customer_without_data_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "list" })))
            .mount(&server)
            .await;

        let err = client_for(&server).find_customer("000").await.unwrap_err();
        assert!(matches!(err, LookupError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_list_open_payments_filters_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .and(query_param("customer", "cus_1"))
            .and(query_param("status", "PENDING,OVERDUE"))
            .and(header("access_token", "$aact_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "pay_1",
                        "customer": "cus_1",
                        "dueDate": "2024-05-01",
                        "value": 99.9,
                        "status": "PENDING",
                        "invoiceUrl": "https://asaas.test/i/1",
                        "bankSlipUrl": "https://asaas.test/b/1"
                    },
                    {
                        "id": "pay_2",
                        "customer": "cus_1",
                        "dueDate": "2024-03-01",
                        "value": 10,
                        "status": "OVERDUE",
                        "invoiceUrl": null,
                        "bankSlipUrl": "https://asaas.test/b/2"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payments = client_for(&server).list_open_payments("cus_1").await.unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].status, PaymentStatus::Pending);
        assert_eq!(payments[1].status, PaymentStatus::Overdue);
        assert_eq!(payments[1].payment_link(), Some("https://asaas.test/b/2"));
    }

    #[tokio::test]
    async fn test_overdue_list_survives_undated_pending_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": "cus_1", "name": "Marcelo Almeida" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .and(query_param("customer", "cus_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "pay_1",
                        "dueDate": "2024-03-01",
                        "value": null,
                        "status": "OVERDUE",
                        "invoiceUrl": "https://asaas.test/i/1"
                    },
                    {
                        "id": null,
                        "customer": null,
                        "dueDate": null,
                        "value": 10,
                        "status": "PENDING"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let outcome = lookup_invoices(&client_for(&server), "24971563792")
            .await
            .unwrap();

        let LookupOutcome::Overdue { payments, .. } = outcome else {
            panic!("expected overdue outcome");
        };
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].display_due_date(), "01/03/2024");
        assert_eq!(payments[0].value, Some(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_list_open_payments_absent_data_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let payments = client_for(&server).list_open_payments("cus_1").await.unwrap();
        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "errors": [{
                    "code": "invalid_access_token",
                    "description": "A chave de API fornecida é inválida"
                }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).find_customer("000").await.unwrap_err();
        match err {
            LookupError::Provider { status, body } => {
                assert_eq!(status, 401);
                assert!(body.starts_with("invalid_access_token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_network_failure() {
        // Nothing listens on the discard port
        let client = AsaasClient::new(AsaasConfig::new("http://127.0.0.1:9", "tok")).unwrap();
        let err = client.find_customer("000").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_invalid_token_header_rejected() {
        let result = AsaasClient::new(AsaasConfig::new("https://api.asaas.com/v3", "bad\ntoken"));
        assert!(matches!(result, Err(LookupError::Configuration(_))));
    }
}
