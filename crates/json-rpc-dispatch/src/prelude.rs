//! # JSON-RPC Dispatch Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use json_rpc_dispatch::prelude::*;
//! ```

pub use crate::builder::MethodBuilder;
pub use crate::config::DispatcherConfig;
pub use crate::dispatch::JsonRpcDispatcher;
pub use crate::error::{DescriptorError, MethodError};
pub use crate::method::{MethodDescriptor, MethodResult, ParamSpec, RpcMethod, RpcService};
pub use crate::request::RequestParams;

#[cfg(feature = "macros")]
pub use crate::rpc_method;

// Standard error codes
pub use crate::error_codes::*;
