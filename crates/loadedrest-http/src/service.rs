//! LoadedRest HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use loadedrest_core::LoadedRestConfig;
use loadedrest_format::{DEFAULT_FORMAT, Format, FormatFactory, FormatOptions};
use loadedrest_model::{Exception, Value};

use crate::body::LoadedRestBody;
use crate::dispatch::{FunctionHandler, WebServiceCall, dispatch_call};
use crate::request::{FUNCTION_PARAM, RequestParams, TOKEN_PARAM, is_blank, is_form_body};
use crate::response::{error_response, forbidden_response, result_response};

/// Response header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Configuration for the LoadedRest HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedRestHttpConfig {
    /// Whether the protocol is enabled. Disabled services answer 403.
    pub enabled: bool,
    /// Options handed to every format.
    pub options: FormatOptions,
}

impl Default for LoadedRestHttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            options: FormatOptions::default(),
        }
    }
}

impl From<&LoadedRestConfig> for LoadedRestHttpConfig {
    fn from(config: &LoadedRestConfig) -> Self {
        Self {
            enabled: config.enabled,
            options: FormatOptions::with_debug(config.debug),
        }
    }
}

/// Hyper `Service` implementation for the LoadedRest protocol.
///
/// Wraps a [`FunctionHandler`] implementation: each request selects a body
/// format, decodes its parameters, runs the named function and answers in
/// the same format.
#[derive(Debug)]
pub struct LoadedRestHttpService<H: FunctionHandler> {
    handler: Arc<H>,
    config: Arc<LoadedRestHttpConfig>,
}

impl<H: FunctionHandler> LoadedRestHttpService<H> {
    /// Create a new `LoadedRestHttpService`.
    pub fn new(handler: Arc<H>, config: LoadedRestHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: FunctionHandler> Clone for LoadedRestHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H, B> hyper::service::Service<http::Request<B>> for LoadedRestHttpService<H>
where
    H: FunctionHandler,
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: Display + Send,
{
    type Response = http::Response<LoadedRestBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, handler.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single LoadedRest request through the full pipeline.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    config: &LoadedRestHttpConfig,
    request_id: &str,
) -> http::Response<LoadedRestBody>
where
    H: FunctionHandler,
    B: http_body::Body,
    B::Error: Display,
{
    // 1. Refuse everything while the protocol is disabled.
    if !config.enabled {
        tracing::debug!(%request_id, "protocol disabled, refusing request");
        return forbidden_response();
    }

    let factory = FormatFactory::new(config.options);
    let (parts, incoming) = req.into_parts();
    let query = parts.uri.query();

    // 2. Collect body.
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(err) => {
            let params = RequestParams::extract(query, None);
            let format = select_format(&factory, &params);
            return error_response(
                format.as_ref(),
                &Exception::invalid_parameter(format!("failed to read request body: {err}")),
            );
        }
    };

    // 3. Merge control parameters and pick the body format.
    let form = is_form_body(&parts.headers);
    let params = RequestParams::extract(query, form.then_some(&body[..]));
    let format = select_format(&factory, &params);

    // 4. Build the call.
    let call = match build_call(format.as_ref(), &params, &body, form) {
        Ok(call) => call,
        Err(exception) => {
            tracing::debug!(%request_id, class = %exception.class, "rejecting request");
            return error_response(format.as_ref(), &exception);
        }
    };

    tracing::info!(
        %request_id,
        function = %call.function,
        format = format.name(),
        "handling web-service call",
    );

    // 5. Dispatch to handler.
    match dispatch_call(handler, call).await {
        Ok(result) => result_response(format.as_ref(), &result),
        Err(exception) => {
            tracing::debug!(%request_id, class = %exception.class, "function raised exception");
            error_response(format.as_ref(), &exception)
        }
    }
}

/// Pick the requested format, defaulting to JSON.
fn select_format(factory: &FormatFactory, params: &RequestParams) -> Box<dyn Format> {
    factory.create_or_default(params.format.as_deref().unwrap_or(DEFAULT_FORMAT))
}

/// Validate control parameters and decode the function parameters.
fn build_call(
    format: &dyn Format,
    params: &RequestParams,
    body: &[u8],
    form: bool,
) -> Result<WebServiceCall, Exception> {
    let token = params.token.clone().ok_or_else(|| {
        Exception::access(format!("missing required parameter {TOKEN_PARAM}"))
    })?;
    let function = params.function.clone().ok_or_else(|| {
        Exception::invalid_parameter(format!("missing required parameter {FUNCTION_PARAM}"))
    })?;

    let parameters = if form || is_blank(body) {
        Value::Object(params.fields.clone())
    } else {
        let decoded = format
            .parse_request_body(body, None)
            .map_err(|e| e.to_exception())?;
        params.merge_into(decoded)
    };

    Ok(WebServiceCall {
        token,
        function,
        parameters,
    })
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body<B>(incoming: B) -> Result<Bytes, B::Error>
where
    B: http_body::Body,
{
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
}

/// Add common response headers to every LoadedRest response.
fn add_common_headers(
    mut response: http::Response<LoadedRestBody>,
    request_id: &str,
) -> http::Response<LoadedRestBody> {
    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, hv);
    }
    response
}
