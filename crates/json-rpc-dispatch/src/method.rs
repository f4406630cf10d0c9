//! # Method Descriptors
//!
//! A [`MethodDescriptor`] captures the calling convention of a registered
//! method once, at registration time: the ordered parameter names, which of
//! them are required, and the defaults of the optional ones. Every call then
//! binds the request's named parameters onto that order and invokes the
//! target positionally.
//!
//! Descriptors are built from:
//! - any [`RpcMethod`] (hand-written or generated by `#[rpc_method]`)
//! - a [`MethodBuilder`](crate::builder::MethodBuilder) closure with an explicit signature
//! - a method of an [`RpcService`] object via [`MethodDescriptor::bound`]

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{CallError, DescriptorError, MethodError};
use crate::request::RequestParams;

/// Result returned by a method body
pub type MethodResult = Result<Value, MethodError>;

/// Positional invocation of a method target
pub type MethodInvoker = Arc<dyn Fn(Vec<Value>) -> MethodResult + Send + Sync>;

/// One declared parameter of a method
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    /// Value used when the caller omits the parameter. `None` makes it required.
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A method target invoked with positional arguments
pub trait RpcMethod: Send + Sync + 'static {
    /// Declared parameters, in the order `invoke` expects them
    fn params(&self) -> Vec<ParamSpec>;

    /// Invoke with one argument per declared parameter
    fn invoke(&self, args: Vec<Value>) -> MethodResult;
}

/// An object exposing several methods by name
///
/// Wrapping one of them with [`MethodDescriptor::bound`] mirrors binding an
/// object and a method name into a single callable.
pub trait RpcService: Send + Sync + 'static {
    /// Name used in diagnostics
    fn service_name(&self) -> &str;

    /// Declared parameters of `method`, or `None` if the service has no such method
    fn method_params(&self, method: &str) -> Option<Vec<ParamSpec>>;

    fn invoke_method(&self, method: &str, args: Vec<Value>) -> MethodResult;
}

/// Pre-built binding of a method's ordered parameters, required subset and defaults
#[derive(Clone)]
pub struct MethodDescriptor {
    all_params: Vec<String>,
    required_params: Vec<String>,
    default_values: HashMap<String, Value>,
    invoker: MethodInvoker,
}

impl MethodDescriptor {
    /// Build a descriptor from an explicit ordered signature
    pub fn new<F>(params: Vec<ParamSpec>, invoker: F) -> Result<Self, DescriptorError>
    where
        F: Fn(Vec<Value>) -> MethodResult + Send + Sync + 'static,
    {
        Self::with_invoker(params, Arc::new(invoker))
    }

    pub(crate) fn with_invoker(
        params: Vec<ParamSpec>,
        invoker: MethodInvoker,
    ) -> Result<Self, DescriptorError> {
        let mut seen = HashSet::new();
        let mut all_params = Vec::with_capacity(params.len());
        let mut required_params = Vec::new();
        let mut default_values = HashMap::new();

        for ParamSpec { name, default } in params {
            if name.is_empty() {
                return Err(DescriptorError::EmptyParamName);
            }
            if !seen.insert(name.clone()) {
                return Err(DescriptorError::DuplicateParam(name));
            }
            all_params.push(name.clone());
            match default {
                Some(value) => {
                    default_values.insert(name, value);
                }
                None => required_params.push(name),
            }
        }

        Ok(Self {
            all_params,
            required_params,
            default_values,
            invoker,
        })
    }

    /// Wrap an [`RpcMethod`], reading its signature once
    pub fn from_method<M: RpcMethod>(method: M) -> Result<Self, DescriptorError> {
        let params = method.params();
        let method = Arc::new(method);
        Self::with_invoker(params, Arc::new(move |args| method.invoke(args)))
    }

    /// Bind `method` of `service` into a descriptor.
    ///
    /// Fails when the service does not expose a method with that name.
    pub fn bound<S: RpcService>(service: Arc<S>, method: &str) -> Result<Self, DescriptorError> {
        let params = service
            .method_params(method)
            .ok_or_else(|| DescriptorError::UnresolvedMethod {
                service: service.service_name().to_string(),
                method: method.to_string(),
            })?;
        let method = method.to_string();
        Self::with_invoker(
            params,
            Arc::new(move |args| service.invoke_method(&method, args)),
        )
    }

    pub fn all_params(&self) -> &[String] {
        &self.all_params
    }

    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    pub fn default_values(&self) -> &HashMap<String, Value> {
        &self.default_values
    }

    pub fn default_value(&self, param: &str) -> Option<&Value> {
        self.default_values.get(param)
    }

    /// Bind named parameters onto the declared order and invoke the target.
    ///
    /// Every required parameter must be present. Optional ones fall back to
    /// their defaults. Failures of the target are passed through unchanged.
    pub fn call(&self, params: &RequestParams) -> Result<Value, CallError> {
        let args = self.bind(params)?;
        (self.invoker)(args).map_err(CallError::Method)
    }

    fn bind(&self, params: &RequestParams) -> Result<Vec<Value>, CallError> {
        if let Some(missing) = self
            .required_params
            .iter()
            .find(|name| !params.contains_key(name.as_str()))
        {
            return Err(CallError::MissingParam(missing.clone()));
        }

        Ok(self
            .all_params
            .iter()
            .map(|name| {
                params
                    .get(name)
                    .or_else(|| self.default_values.get(name))
                    .cloned()
                    .unwrap_or(Value::Null)
            })
            .collect())
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("all_params", &self.all_params)
            .field("required_params", &self.required_params)
            .field("default_values", &self.default_values)
            .finish_non_exhaustive()
    }
}

/// Values that can be registered on a dispatcher
pub trait IntoMethodDescriptor {
    fn into_descriptor(self) -> Result<MethodDescriptor, DescriptorError>;
}

impl IntoMethodDescriptor for MethodDescriptor {
    fn into_descriptor(self) -> Result<MethodDescriptor, DescriptorError> {
        Ok(self)
    }
}

impl IntoMethodDescriptor for Result<MethodDescriptor, DescriptorError> {
    fn into_descriptor(self) -> Result<MethodDescriptor, DescriptorError> {
        self
    }
}

impl<M: RpcMethod> IntoMethodDescriptor for M {
    fn into_descriptor(self) -> Result<MethodDescriptor, DescriptorError> {
        MethodDescriptor::from_method(self)
    }
}
