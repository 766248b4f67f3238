//! Request and response bodies.

use super::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /addContract`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddContractRequest {
    /// String or number.
    pub key: Value,
    /// `None` only when the field is absent; `null` is a value.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl AddContractRequest {
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
    }

    /// Chaincode arguments: the key as text and the value re-encoded as JSON.
    pub fn into_args(self) -> Result<Vec<String>, ApiError> {
        let key = contract_key(&self.key)?;
        let value = self
            .value
            .ok_or_else(|| ApiError::bad_request("Missing field `value`"))?;
        Ok(vec![key, value.to_string()])
    }
}

/// Keys are accepted as strings or numbers and passed on as text.
pub fn contract_key(key: &Value) -> Result<String, ApiError> {
    match key {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(_) => Err(ApiError::bad_request("Contract key cannot be empty")),
        _ => Err(ApiError::bad_request("Contract key must be a string or a number")),
    }
}

/// Body of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub success: String,
    pub payload: String,
}

/// Body of `GET /contracts/{key}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractResponse {
    pub key: String,
    /// Stored value, decoded as JSON when it is JSON.
    pub contract: Value,
}

impl ContractResponse {
    pub fn from_payload(key: String, payload: &[u8]) -> Self {
        let contract = serde_json::from_slice(payload)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload).into_owned()));
        Self { key, contract }
    }
}
