use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::JsonRpcErrorObject;
use crate::types::{JsonRpcVersion, RequestId};

/// Outcome carried by a response: exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Result(Value),
    Error(JsonRpcErrorObject),
}

/// A finalized JSON-RPC response
///
/// Serializes as `jsonrpc`, then `result` or `error`, then `id`. A success
/// response without an id leaves `id` out; an error response always carries
/// `id`, using `null` when the originating id is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub version: JsonRpcVersion,
    pub id: Option<RequestId>,
    pub payload: ResponsePayload,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            payload: ResponsePayload::Result(result),
        }
    }

    pub fn error(id: Option<RequestId>, error: JsonRpcErrorObject) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            payload: ResponsePayload::Error(error),
        }
    }

    /// Response for input that is not valid JSON
    pub fn parse_error() -> Self {
        Self::error(None, JsonRpcErrorObject::parse_error())
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(value) => Some(value),
            ResponsePayload::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&JsonRpcErrorObject> {
        match &self.payload {
            ResponsePayload::Error(error) => Some(error),
            ResponsePayload::Result(_) => None,
        }
    }

    /// Convert to a serde_json::Value
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            // Serializing a tree of serde_json values cannot fail.
            Value::Null
        })
    }
}

impl Serialize for JsonRpcResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let has_id_entry = self.id.is_some() || self.is_error();
        let mut map = serializer.serialize_map(Some(if has_id_entry { 3 } else { 2 }))?;
        map.serialize_entry("jsonrpc", &self.version)?;
        match &self.payload {
            ResponsePayload::Result(value) => map.serialize_entry("result", value)?,
            ResponsePayload::Error(error) => map.serialize_entry("error", error)?,
        }
        if has_id_entry {
            map.serialize_entry("id", &self.id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MethodError;
    use serde_json::{json, to_string};

    #[test]
    fn test_success_response_serialization() {
        let response = JsonRpcResponse::success(Some(RequestId::from(3)), json!("result"));
        assert_eq!(
            to_string(&response).unwrap(),
            r#"{"jsonrpc":"2.0","result":"result","id":3}"#
        );
    }

    #[test]
    fn test_success_without_id_omits_id() {
        let response = JsonRpcResponse::success(None, json!("result"));
        assert_eq!(
            to_string(&response).unwrap(),
            r#"{"jsonrpc":"2.0","result":"result"}"#
        );
    }

    #[test]
    fn test_parse_error_serialization() {
        assert_eq!(
            to_string(&JsonRpcResponse::parse_error()).unwrap(),
            r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error"},"id":null}"#
        );
    }

    #[test]
    fn test_null_result_is_kept() {
        let response = JsonRpcResponse::success(Some(RequestId::from("a")), Value::Null);
        assert_eq!(
            to_string(&response).unwrap(),
            r#"{"jsonrpc":"2.0","result":null,"id":"a"}"#
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let response = JsonRpcResponse::error(
            Some(RequestId::from(7)),
            JsonRpcErrorObject::from_method_error(
                MethodError::new(42, "nope").with_data(json!({"z": 1, "a": [1, 2]})),
            ),
        );
        let first = to_string(&response).unwrap();
        let second = to_string(&response).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(r#"{"jsonrpc":"2.0","error":"#));
        assert!(first.ends_with(r#""id":7}"#));
    }

    #[test]
    fn test_accessors() {
        let ok = JsonRpcResponse::success(None, json!(1));
        assert!(!ok.is_error());
        assert_eq!(ok.result(), Some(&json!(1)));
        assert!(ok.error_object().is_none());

        let err = JsonRpcResponse::parse_error();
        assert!(err.is_error());
        assert_eq!(err.error_object().and_then(|e| e.code), Some(-32700));
        assert_eq!(err.to_value()["id"], Value::Null);
    }
}
