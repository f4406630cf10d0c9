use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::error_codes;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object
///
/// `code` and `message` are optional because application failures that carry
/// no code (or an empty message) are reported with those members absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: Option<i64>, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message,
            data,
        }
    }

    pub fn parse_error() -> Self {
        let code = JsonRpcErrorCode::ParseError;
        Self::new(Some(code.code()), Some(code.message().to_string()), None)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(
            Some(JsonRpcErrorCode::InvalidRequest.code()),
            Some(message.into()),
            None,
        )
    }

    /// Unknown method. The name travels in `data`, no message is attached.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            Some(JsonRpcErrorCode::MethodNotFound.code()),
            None,
            Some(serde_json::json!({ "method": method })),
        )
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(
            Some(JsonRpcErrorCode::InvalidParams.code()),
            Some(message.into()),
            None,
        )
    }

    /// Map a failure raised by a method body. Zero codes and empty messages
    /// are treated as absent.
    pub fn from_method_error(error: MethodError) -> Self {
        let MethodError {
            code,
            message,
            data,
        } = error;
        Self::new(
            (code != 0).then_some(code),
            (!message.is_empty()).then_some(message),
            data,
        )
    }
}

impl fmt::Display for JsonRpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.message.as_deref()) {
            (Some(code), Some(message)) => write!(f, "JSON-RPC Error {}: {}", code, message),
            (Some(code), None) => write!(f, "JSON-RPC Error {}", code),
            (None, Some(message)) => write!(f, "JSON-RPC Error: {}", message),
            (None, None) => write!(f, "JSON-RPC Error"),
        }
    }
}

/// Failure raised by a registered method body.
///
/// A `code` of `0` means "no code" and an empty `message` means "no message";
/// both are left out of the error object sent to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("method failed ({code}): {message}")]
pub struct MethodError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

impl MethodError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Error with a message only
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<String> for MethodError {
    fn from(message: String) -> Self {
        Self::message(message)
    }
}

impl From<&str> for MethodError {
    fn from(message: &str) -> Self {
        Self::message(message)
    }
}

impl From<serde_json::Error> for MethodError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Reasons a raw envelope cannot be turned into a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request must be a JSON object")]
    NotAnObject,

    #[error("Request is not valid JsonRPC request: missing protocol version")]
    MissingVersion,

    #[error("Request is not valid JsonRPC request: unsupported protocol version")]
    UnsupportedVersion,

    #[error("Request is not valid JsonRPC request: missing method")]
    MissingMethod,

    #[error("Request is not valid JsonRPC request: method must be a non-empty string")]
    InvalidMethod,

    #[error("Request is not valid JsonRPC request: params must be an object")]
    InvalidParams,

    #[error("Request is not valid JsonRPC request: id must be a string or number")]
    InvalidId,
}

/// Failures while binding and invoking a method descriptor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("Missing required parameter `{0}`")]
    MissingParam(String),

    #[error(transparent)]
    Method(#[from] MethodError),
}

/// Registration-time failures: the target cannot be wrapped into a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("Invalid method target: parameter name must not be empty")]
    EmptyParamName,

    #[error("Invalid method target: duplicate parameter `{0}`")]
    DuplicateParam(String),

    #[error("Invalid method target: `{method}` does not resolve to a method of `{service}`")]
    UnresolvedMethod { service: String, method: String },

    #[error("Invalid method target: no handler supplied")]
    MissingHandler,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(JsonRpcErrorCode::ParseError.code(), -32700);
        assert_eq!(JsonRpcErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(JsonRpcErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(JsonRpcErrorCode::InvalidParams.code(), -32602);
    }

    #[test]
    fn test_parse_error_serialization() {
        let json = serde_json::to_string(&JsonRpcErrorObject::parse_error()).unwrap();
        assert_eq!(json, r#"{"code":-32700,"message":"Parse error"}"#);
    }

    #[test]
    fn test_method_not_found_has_no_message() {
        let error = JsonRpcErrorObject::method_not_found("test2");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"code": -32601, "data": {"method": "test2"}})
        );
    }

    #[test]
    fn test_method_error_zero_code_and_empty_message_are_absent() {
        let error = JsonRpcErrorObject::from_method_error(MethodError::new(0, ""));
        assert_eq!(error.code, None);
        assert_eq!(error.message, None);
        assert_eq!(serde_json::to_string(&error).unwrap(), "{}");

        let error = JsonRpcErrorObject::from_method_error(MethodError::new(1133, "WOOOHOO"));
        assert_eq!(error.code, Some(1133));
        assert_eq!(error.message.as_deref(), Some("WOOOHOO"));
    }

    #[test]
    fn test_call_error_messages() {
        let error = CallError::MissingParam("a".to_string());
        assert_eq!(error.to_string(), "Missing required parameter `a`");

        let error: CallError = MethodError::message("boom").into();
        assert_eq!(error.to_string(), "method failed (0): boom");
    }
}
