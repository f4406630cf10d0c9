use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::RequestError,
    types::{JsonRpcVersion, RequestId},
};

/// Named parameters of a JSON-RPC request
pub type RequestParams = Map<String, Value>;

/// A validated JSON-RPC call or notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl JsonRpcRequest {
    pub fn new(id: Option<RequestId>, method: String, params: Option<RequestParams>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method,
            params,
            id,
        }
    }

    /// Create a new call with no parameters
    pub fn new_no_params(id: RequestId, method: String) -> Self {
        Self::new(Some(id), method, None)
    }

    /// Create a new notification (no id, so no response is produced)
    pub fn notification(method: String, params: Option<RequestParams>) -> Self {
        Self::new(None, method, params)
    }

    /// Build a request from a raw envelope.
    ///
    /// Only the members the dispatcher needs are validated; unknown members
    /// are ignored.
    pub fn from_value(envelope: &Value) -> Result<Self, RequestError> {
        let obj = envelope.as_object().ok_or(RequestError::NotAnObject)?;

        match obj.get("jsonrpc") {
            None => return Err(RequestError::MissingVersion),
            Some(Value::String(v)) if v == crate::JSONRPC_VERSION => {}
            Some(_) => return Err(RequestError::UnsupportedVersion),
        }

        let method = match obj.get("method") {
            None => return Err(RequestError::MissingMethod),
            Some(Value::String(m)) if !m.is_empty() => m.clone(),
            Some(_) => return Err(RequestError::InvalidMethod),
        };

        let params = match obj.get("params") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(_) => return Err(RequestError::InvalidParams),
        };

        let id = match obj.get("id") {
            None => None,
            Some(value) => RequestId::from_value(value).map_err(|_| RequestError::InvalidId)?,
        };

        Ok(Self::new(id, method, params))
    }

    /// A notification carries no id and never produces a response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Get a parameter by name
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref()?.get(name)
    }
}

impl TryFrom<&Value> for JsonRpcRequest {
    type Error = RequestError;

    fn try_from(envelope: &Value) -> Result<Self, Self::Error> {
        Self::from_value(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_parse_valid_request() {
        let request =
            JsonRpcRequest::from_value(&json!({"jsonrpc": "2.0", "method": "test", "id": 1}))
                .unwrap();

        assert_eq!(request.method, "test");
        assert_eq!(request.id, Some(RequestId::from(1)));
        assert!(request.params.is_none());
        assert!(!request.is_notification());
    }

    #[test]
    fn test_parse_notification() {
        let request =
            JsonRpcRequest::from_value(&json!({"jsonrpc": "2.0", "method": "notify"})).unwrap();
        assert!(request.is_notification());

        let request =
            JsonRpcRequest::from_value(&json!({"jsonrpc": "2.0", "method": "notify", "id": null}))
                .unwrap();
        assert!(request.is_notification());
    }

    #[test]
    fn test_falsy_ids_are_present() {
        let request =
            JsonRpcRequest::from_value(&json!({"jsonrpc": "2.0", "method": "m", "id": 0}))
                .unwrap();
        assert_eq!(request.id, Some(RequestId::from(0)));

        let request =
            JsonRpcRequest::from_value(&json!({"jsonrpc": "2.0", "method": "m", "id": ""}))
                .unwrap();
        assert_eq!(request.id, Some(RequestId::from("")));
    }

    #[test]
    fn test_object_params() {
        let request = JsonRpcRequest::from_value(&json!({
            "jsonrpc": "2.0",
            "method": "set_value",
            "params": {"name": "test", "value": 42},
            "id": "req1"
        }))
        .unwrap();

        assert_eq!(request.get_param("name"), Some(&json!("test")));
        assert_eq!(request.get_param("value"), Some(&json!(42)));
        assert_eq!(request.get_param("missing"), None);
    }

    #[test]
    fn test_invalid_envelopes() {
        let cases = [
            (json!("text"), RequestError::NotAnObject),
            (json!({"method": "m", "id": 2}), RequestError::MissingVersion),
            (json!({"jsonrpc": 2.0, "method": "m"}), RequestError::UnsupportedVersion),
            (json!({"jsonrpc": "1.0", "method": "m"}), RequestError::UnsupportedVersion),
            (json!({"jsonrpc": "2.0", "id": 1}), RequestError::MissingMethod),
            (json!({"jsonrpc": "2.0", "method": ""}), RequestError::InvalidMethod),
            (json!({"jsonrpc": "2.0", "method": 7}), RequestError::InvalidMethod),
            (
                json!({"jsonrpc": "2.0", "method": "m", "params": [1, 2]}),
                RequestError::InvalidParams,
            ),
            (
                json!({"jsonrpc": "2.0", "method": "m", "id": {"a": 1}}),
                RequestError::InvalidId,
            ),
        ];

        for (envelope, expected) in cases {
            assert_eq!(JsonRpcRequest::from_value(&envelope), Err(expected), "{envelope}");
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest::new_no_params(RequestId::from(1), "test_method".to_string());
        assert_eq!(
            to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "test_method", "id": 1})
        );

        let notification = JsonRpcRequest::notification("ping".to_string(), None);
        let json_str = serde_json::to_string(&notification).unwrap();
        assert!(!json_str.contains("\"id\""));
    }
}
