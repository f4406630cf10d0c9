//! # JSON-RPC 2.0 Dispatch Engine
//!
//! A transport-agnostic, synchronous JSON-RPC 2.0 server core. Raw request
//! text goes in, response text (or nothing, for notifications) comes out.
//!
//! ## Features
//! - Single and batch requests, with responses in input order
//! - Named parameters bound onto each method's declared order, with defaults
//! - Method descriptors built once at registration time
//! - `#[rpc_method]` to derive descriptors from plain functions (`macros` feature)
//! - Every protocol failure answered with a JSON-RPC error object
//!
//! ```rust
//! use json_rpc_dispatch::prelude::*;
//! use serde_json::json;
//!
//! let mut dispatcher = JsonRpcDispatcher::new();
//! dispatcher
//!     .register_method(
//!         "greet",
//!         MethodBuilder::new()
//!             .param("name")
//!             .param_with_default("greeting", json!("Hello"))
//!             .handler(|args| {
//!                 let name = args[0].as_str().unwrap_or_default();
//!                 let greeting = args[1].as_str().unwrap_or_default();
//!                 Ok(json!(format!("{greeting}, {name}!")))
//!             })
//!             .build()?,
//!     )?;
//!
//! let response = dispatcher.handle(
//!     r#"{"jsonrpc": "2.0", "method": "greet", "params": {"name": "world"}, "id": 1}"#,
//! );
//! assert_eq!(
//!     response.as_deref(),
//!     Some(r#"{"jsonrpc":"2.0","result":"Hello, world!","id":1}"#)
//! );
//! # Ok::<(), json_rpc_dispatch::DescriptorError>(())
//! ```

pub mod builder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod method;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use builder::MethodBuilder;
pub use config::DispatcherConfig;
pub use dispatch::{JsonRpcDispatcher, JsonRpcReply};
pub use error::{
    CallError, DescriptorError, JsonRpcErrorCode, JsonRpcErrorObject, MethodError, RequestError,
};
pub use method::{
    IntoMethodDescriptor, MethodDescriptor, MethodResult, ParamSpec, RpcMethod, RpcService,
};
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcResponse, ResponsePayload};
pub use types::{JsonRpcVersion, RequestId};

#[cfg(feature = "macros")]
pub use json_rpc_dispatch_derive::rpc_method;

// Used by code generated with `#[rpc_method]`
#[doc(hidden)]
pub use serde_json;

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}
