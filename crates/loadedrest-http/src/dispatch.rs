//! Function handler trait and call dispatch.

use std::future::Future;
use std::pin::Pin;

use loadedrest_model::{Exception, Schema, Value};

/// A parsed web-service call.
#[derive(Debug, Clone, PartialEq)]
pub struct WebServiceCall {
    /// Authentication token supplied by the client.
    pub token: String,
    /// Name of the function to run.
    pub function: String,
    /// Decoded call parameters.
    pub parameters: Value,
}

/// What a function returned, and how it describes its result.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResult {
    /// The raw result.
    pub value: Value,
    /// The declared return shape, or `None` for functions that return nothing.
    pub returns: Option<Schema>,
}

impl FunctionResult {
    /// A result described by `returns`.
    #[must_use]
    pub fn new(value: Value, returns: Schema) -> Self {
        Self {
            value,
            returns: Some(returns),
        }
    }

    /// The result of a function that declares no return value.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            value: Value::Null,
            returns: None,
        }
    }
}

/// Boxed future returned by [`FunctionHandler::handle_call`].
pub type CallFuture = Pin<Box<dyn Future<Output = Result<FunctionResult, Exception>> + Send>>;

/// Trait that the function registry must implement.
///
/// The handler authenticates the token, runs the function and validates its
/// result. This is the boundary between the HTTP transport layer and the
/// function implementations.
pub trait FunctionHandler: Send + Sync + 'static {
    /// Run a web-service call.
    fn handle_call(&self, call: WebServiceCall) -> CallFuture;
}

/// Dispatch a call to the handler.
pub async fn dispatch_call<H: FunctionHandler + ?Sized>(
    handler: &H,
    call: WebServiceCall,
) -> Result<FunctionResult, Exception> {
    tracing::debug!(function = %call.function, "dispatching web-service call");
    handler.handle_call(call).await
}

/// Default handler that rejects every call.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl FunctionHandler for NotImplementedHandler {
    fn handle_call(&self, call: WebServiceCall) -> CallFuture {
        Box::pin(async move { Err(Exception::unknown_function(&call.function)) })
    }
}
