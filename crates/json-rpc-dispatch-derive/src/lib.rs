//! # JSON-RPC Dispatch Macros
//!
//! Procedural macros that build method descriptors at compile time.
//!
//! - `#[rpc_method]` - turn a plain function into an `RpcMethod` whose
//!   parameter names, order and defaults come from the function signature

use proc_macro::TokenStream;
use syn::{ItemFn, Meta, Token, parse_macro_input, punctuated::Punctuated};

mod method_attr;
mod utils;

/// Function attribute macro for creating RPC methods
///
/// The function is kept (renamed with an `_impl` suffix). A unit struct named
/// after the function in PascalCase with a `Method` suffix implements
/// `json_rpc_dispatch::RpcMethod`, and a constructor with the same
/// function name returns it.
///
/// Parameters are bound by name. A parameter is optional when it carries
/// `#[param(default = <expr>)]` or has type `Option<T>`; everything else is
/// required. `#[param(name = "...")]` changes the name used on the wire.
/// Parameter types must implement `serde::de::DeserializeOwned`; the return
/// type is any `Serialize` value or a `Result<T, E>` with
/// `E: Into<json_rpc_dispatch::MethodError>`.
///
/// # Example
///
/// ```rust,ignore
/// use json_rpc_dispatch::{JsonRpcDispatcher, MethodError, rpc_method};
///
/// #[rpc_method]
/// fn divide(a: f64, #[param(default = 1.0)] b: f64) -> Result<f64, MethodError> {
///     if b == 0.0 {
///         return Err(MethodError::new(1, "Division by zero"));
///     }
///     Ok(a / b)
/// }
///
/// let mut dispatcher = JsonRpcDispatcher::new();
/// dispatcher.register_method("divide", divide())?;
/// ```
#[proc_macro_attribute]
pub fn rpc_method(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input = parse_macro_input!(input as ItemFn);
    method_attr::rpc_method_impl(args, input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
