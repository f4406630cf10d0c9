//! Method Builder for Runtime Descriptor Construction
//!
//! Builds a [`MethodDescriptor`] from an explicit ordered signature and a
//! closure, without requiring the `#[rpc_method]` macro.

use std::sync::Arc;

use serde_json::Value;

use crate::error::DescriptorError;
use crate::method::{MethodDescriptor, MethodInvoker, MethodResult, ParamSpec};

/// Builder for method descriptors
#[derive(Default)]
pub struct MethodBuilder {
    params: Vec<ParamSpec>,
    handler: Option<MethodInvoker>,
}

impl MethodBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::required(name));
        self
    }

    /// Append an optional parameter with its default value
    pub fn param_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(ParamSpec::optional(name, default));
        self
    }

    /// Set the body. It receives one argument per declared parameter, in order.
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> MethodResult + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<MethodDescriptor, DescriptorError> {
        let handler = self.handler.ok_or(DescriptorError::MissingHandler)?;
        MethodDescriptor::with_invoker(self.params, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestParams;
    use serde_json::json;

    #[test]
    fn test_method_builder_basic() {
        let method = MethodBuilder::new()
            .param("name")
            .param_with_default("greeting", json!("Hello"))
            .handler(|args| {
                let name = args[0].as_str().unwrap_or_default();
                let greeting = args[1].as_str().unwrap_or_default();
                Ok(json!(format!("{greeting}, {name}!")))
            })
            .build()
            .unwrap();

        assert_eq!(method.all_params(), ["name", "greeting"]);
        assert_eq!(method.required_params(), ["name"]);

        let mut params = RequestParams::new();
        params.insert("name".to_string(), json!("world"));
        assert_eq!(method.call(&params).unwrap(), json!("Hello, world!"));
    }

    #[test]
    fn test_method_builder_requires_handler() {
        let result = MethodBuilder::new().param("a").build();
        assert_eq!(result.unwrap_err(), DescriptorError::MissingHandler);
    }
}
