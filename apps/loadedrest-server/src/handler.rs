//! Demo function handler.
//!
//! Registers a handful of functions so both body formats can be exercised end
//! to end:
//!
//! - `loadedrest_echo` returns its `message` parameter
//! - `loadedrest_site_info` returns a nested object with a list of functions
//! - `loadedrest_ping` returns nothing

use loadedrest_http::{CallFuture, FunctionHandler, FunctionResult, WebServiceCall};
use loadedrest_model::{Exception, Schema, Value};
use serde_json::json;

/// Name the demo site reports about itself.
const SITE_NAME: &str = "LoadedRest";

/// Functions served by [`DemoHandler`], in the order `loadedrest_site_info` lists them.
const FUNCTIONS: &[&str] = &["loadedrest_echo", "loadedrest_site_info", "loadedrest_ping"];

/// Function handler serving the demo functions.
#[derive(Debug, Clone, Default)]
pub struct DemoHandler;

impl FunctionHandler for DemoHandler {
    fn handle_call(&self, call: WebServiceCall) -> CallFuture {
        Box::pin(async move {
            if call.token.trim().is_empty() {
                return Err(Exception::access("empty token"));
            }

            match call.function.as_str() {
                "loadedrest_echo" => echo(&call.parameters),
                "loadedrest_site_info" => Ok(site_info()),
                "loadedrest_ping" => Ok(FunctionResult::empty()),
                other => Err(Exception::unknown_function(other)),
            }
        })
    }
}

fn echo(parameters: &Value) -> Result<FunctionResult, Exception> {
    let message = parameters
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| Exception::invalid_parameter("message: required text parameter"))?;

    Ok(FunctionResult::new(
        json!({ "message": message }),
        Schema::object([("message", Schema::text())]),
    ))
}

fn site_info() -> FunctionResult {
    let functions: Vec<Value> = FUNCTIONS
        .iter()
        .map(|name| json!({ "name": name, "version": env!("CARGO_PKG_VERSION") }))
        .collect();

    let value = json!({
        "sitename": SITE_NAME,
        "release": env!("CARGO_PKG_VERSION"),
        "userissiteadmin": false,
        "functions": functions,
    });

    let returns = Schema::object([
        ("sitename", Schema::text()),
        ("release", Schema::text()),
        ("userissiteadmin", Schema::boolean()),
        (
            "functions",
            Schema::list(Schema::object([
                ("name", Schema::text()),
                ("version", Schema::text()),
            ])),
        ),
    ]);

    FunctionResult::new(value, returns)
}
