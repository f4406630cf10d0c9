//! # JSON-RPC Dispatcher
//!
//! Owns the method registry and turns raw request text into raw response
//! text: decode → validate → expand batch → bind and invoke → map errors →
//! encode. Everything runs synchronously on the caller's thread.
//!
//! The registry has no internal locking. Registration takes `&mut self` and
//! dispatch takes `&self`; hosts that register methods while serving wrap the
//! dispatcher in their own lock.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    config::DispatcherConfig,
    error::{CallError, DescriptorError, JsonRpcErrorObject},
    method::{IntoMethodDescriptor, MethodDescriptor},
    request::{JsonRpcRequest, RequestParams},
    response::JsonRpcResponse,
};

/// Responses produced for one decoded input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcReply {
    /// Reply to a single envelope, sent as a bare object
    Single(JsonRpcResponse),
    /// Reply to a batch, sent as an array
    Batch(Vec<JsonRpcResponse>),
}

/// JSON-RPC method dispatcher
#[derive(Debug, Default)]
pub struct JsonRpcDispatcher {
    methods: HashMap<String, MethodDescriptor>,
    config: DispatcherConfig,
}

impl JsonRpcDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            methods: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a method under `name`, replacing any previous registration.
    ///
    /// Accepts a ready [`MethodDescriptor`] or anything that can be wrapped
    /// into one.
    pub fn register_method<M>(
        &mut self,
        name: impl Into<String>,
        method: M,
    ) -> Result<&mut Self, DescriptorError>
    where
        M: IntoMethodDescriptor,
    {
        let name = name.into();
        let descriptor = method.into_descriptor()?;
        debug!(
            "Registered method '{}' with params {:?}",
            name,
            descriptor.all_params()
        );
        if self.methods.insert(name.clone(), descriptor).is_some() {
            debug!("Method '{}' replaced a previous registration", name);
        }
        Ok(self)
    }

    /// Remove a method. Unknown names are ignored.
    pub fn unregister_method(&mut self, name: &str) {
        if self.methods.remove(name).is_some() {
            debug!("Unregistered method '{}'", name);
        }
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// Names of all registered methods, sorted
    pub fn registered_methods(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    /// Handle raw request text.
    ///
    /// Returns the response text, or `None` when nothing must be sent back
    /// (a notification, or a batch made only of notifications).
    pub fn handle(&self, raw: &str) -> Option<String> {
        let reply = match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.handle_decoded(value)?,
            Err(e) => {
                warn!("Failed to decode JSON-RPC input: {}", e);
                JsonRpcReply::Single(JsonRpcResponse::parse_error())
            }
        };

        match serde_json::to_string(&reply) {
            Ok(text) => Some(text),
            Err(e) => {
                error!("Failed to encode JSON-RPC reply: {}", e);
                None
            }
        }
    }

    /// Handle an already decoded input value
    pub fn handle_value(&self, value: Value) -> Option<Value> {
        self.handle_decoded(value).map(|reply| match reply {
            JsonRpcReply::Single(response) => response.to_value(),
            JsonRpcReply::Batch(responses) => {
                Value::Array(responses.iter().map(JsonRpcResponse::to_value).collect())
            }
        })
    }

    fn handle_decoded(&self, value: Value) -> Option<JsonRpcReply> {
        if is_empty_input(&value) {
            warn!("Empty JSON-RPC input: {}", value);
            return Some(JsonRpcReply::Single(JsonRpcResponse::parse_error()));
        }

        match value {
            Value::Array(envelopes) => {
                if self.config.batch_too_large(envelopes.len()) {
                    warn!(
                        "Rejecting batch of {} requests (limit {:?})",
                        envelopes.len(),
                        self.config.max_batch_size
                    );
                    return Some(JsonRpcReply::Single(JsonRpcResponse::error(
                        None,
                        JsonRpcErrorObject::invalid_request("Batch too large"),
                    )));
                }
                let responses = self.process_batch(&envelopes);
                (!responses.is_empty()).then_some(JsonRpcReply::Batch(responses))
            }
            envelope => self
                .process_batch(std::slice::from_ref(&envelope))
                .into_iter()
                .next()
                .map(JsonRpcReply::Single),
        }
    }

    /// Process envelopes in order.
    ///
    /// Invalid envelopes yield an INVALID_REQUEST response with a null id.
    /// Valid ones are dispatched; only calls carrying an id contribute a
    /// response.
    pub fn process_batch(&self, envelopes: &[Value]) -> Vec<JsonRpcResponse> {
        let mut responses = Vec::with_capacity(envelopes.len());

        for envelope in envelopes {
            let request = match JsonRpcRequest::from_value(envelope) {
                Ok(request) => request,
                Err(e) => {
                    debug!("Invalid JSON-RPC envelope: {}", e);
                    responses.push(JsonRpcResponse::error(
                        None,
                        JsonRpcErrorObject::invalid_request(e.to_string()),
                    ));
                    continue;
                }
            };

            let response = self.handle_request(&request);
            if request.is_notification() {
                if let Some(error) = response.error_object() {
                    debug!(
                        "Discarding error from notification '{}': {}",
                        request.method, error
                    );
                }
                continue;
            }
            responses.push(response);
        }

        responses
    }

    /// Resolve, bind and invoke one request
    pub fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let Some(descriptor) = self.methods.get(&request.method) else {
            debug!("Method not found: '{}'", request.method);
            return JsonRpcResponse::error(
                id,
                JsonRpcErrorObject::method_not_found(&request.method),
            );
        };

        debug!("Dispatching '{}' (id: {:?})", request.method, request.id);
        let empty = RequestParams::new();
        let params = request.params.as_ref().unwrap_or(&empty);

        match descriptor.call(params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e @ CallError::MissingParam(_)) => {
                debug!("Invalid params for '{}': {}", request.method, e);
                JsonRpcResponse::error(id, JsonRpcErrorObject::invalid_params(e.to_string()))
            }
            Err(CallError::Method(e)) => {
                debug!("Method '{}' failed: {}", request.method, e);
                JsonRpcResponse::error(id, JsonRpcErrorObject::from_method_error(e))
            }
        }
    }
}

/// Inputs treated like undecodable text: null, false, zero, "" and []
fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}
