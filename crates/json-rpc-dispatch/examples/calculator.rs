//! Line-oriented calculator service.
//!
//! Reads one JSON-RPC request (or batch) per line from stdin and writes each
//! response line to stdout. Notifications produce no output.
//!
//! ```text
//! $ echo '{"jsonrpc":"2.0","method":"add","params":{"a":1,"b":2},"id":1}' \
//!     | cargo run --example calculator
//! {"jsonrpc":"2.0","result":3.0,"id":1}
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use json_rpc_dispatch::prelude::*;
use serde_json::json;
use tracing::info;

#[rpc_method]
fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[rpc_method]
fn subtract(minuend: f64, #[param(default = 0.0)] subtrahend: f64) -> f64 {
    minuend - subtrahend
}

#[rpc_method]
fn divide(dividend: f64, divisor: f64) -> Result<f64, MethodError> {
    if divisor == 0.0 {
        return Err(MethodError::new(1, "Division by zero").with_data(json!({"dividend": dividend})));
    }
    Ok(dividend / divisor)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut dispatcher =
        JsonRpcDispatcher::with_config(DispatcherConfig::default().with_max_batch_size(64));
    dispatcher
        .register_method("add", add())?
        .register_method("subtract", subtract())?
        .register_method("divide", divide())?
        .register_method(
            "power",
            MethodBuilder::new()
                .param("base")
                .param_with_default("exponent", json!(2))
                .handler(|args| {
                    let base = args[0]
                        .as_f64()
                        .ok_or_else(|| MethodError::invalid_params("`base` must be a number"))?;
                    let exponent = args[1]
                        .as_i64()
                        .and_then(|e| i32::try_from(e).ok())
                        .ok_or_else(|| MethodError::invalid_params("`exponent` must be an integer"))?;
                    Ok(json!(base.powi(exponent)))
                })
                .build()?,
        )?;

    info!("Serving methods: {}", dispatcher.registered_methods().join(", "));

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = dispatcher.handle(&line) {
            writeln!(stdout, "{response}")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
