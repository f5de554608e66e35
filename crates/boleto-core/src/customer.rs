//! # Customer
//!
//! Provider-owned customer record, fetched fresh on every lookup.

use serde::{Deserialize, Serialize};

/// A customer as returned by the billing provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Provider-assigned identifier (e.g., "cus_000005219613")
    pub id: String,

    /// Display name, if the provider has one on file
    #[serde(default)]
    pub name: Option<String>,

    /// Tax identifier (CPF or CNPJ) used as the lookup key
    #[serde(rename = "cpfCnpj", default, skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            cpf_cnpj: None,
        }
    }

    /// Builder: set tax identifier
    pub fn with_cpf_cnpj(mut self, cpf_cnpj: impl Into<String>) -> Self {
        self.cpf_cnpj = Some(cpf_cnpj.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_shape() {
        let json = r#"{
            "object": "customer",
            "id": "cus_000005219613",
            "name": "Marcelo Almeida",
            "cpfCnpj": "24971563792",
            "email": "marcelo.almeida@gmail.com"
        }"#;

        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, "cus_000005219613");
        assert_eq!(customer.name.as_deref(), Some("Marcelo Almeida"));
        assert_eq!(customer.cpf_cnpj.as_deref(), Some("24971563792"));
    }

    #[test]
    fn test_missing_or_null_name() {
        let customer: Customer = serde_json::from_str(r#"{"id":"cus_1"}"#).unwrap();
        assert_eq!(customer.name, None);

        let customer: Customer = serde_json::from_str(r#"{"id":"cus_1","name":null}"#).unwrap();
        assert_eq!(customer.id, "cus_1");
        assert_eq!(customer.name, None);
    }
}
