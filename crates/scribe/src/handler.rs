//! Handlers and the request context they receive.

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, Request, Response, StatusCode};
use scribe_router::{Params, RouteId};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Future returned by a handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response<Bytes>> + Send>>;

/// An async request handler.
///
/// Implemented for every `Fn(RequestContext) -> impl Future<Output =
/// Response<Bytes>>` closure or function.
pub trait Handler: Send + Sync + 'static {
    /// Handles one request.
    fn call(&self, ctx: RequestContext) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response<Bytes>> + Send + 'static,
{
    fn call(&self, ctx: RequestContext) -> HandlerFuture {
        Box::pin(self(ctx))
    }
}

/// A matched request plus its captured path parameters.
#[derive(Debug)]
pub struct RequestContext {
    route_id: RouteId,
    params: Params,
    request: Request<Bytes>,
}

impl RequestContext {
    pub(crate) fn new(route_id: RouteId, params: Params, request: Request<Bytes>) -> Self {
        Self {
            route_id,
            params,
            request,
        }
    }

    /// The matched route.
    #[must_use]
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    /// Raw query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.request.uri().query()
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Captured path parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A path parameter as text.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// A path parameter parsed as `T`.
    #[must_use]
    pub fn param_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.params.parse(name)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.request.body())
    }

    /// The underlying request.
    #[must_use]
    pub fn into_request(self) -> Request<Bytes> {
        self.request
    }
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .unwrap_or_else(|_| Response::new(Bytes::new()))
}

/// A JSON response. Serialization failures become a 500.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Bytes> {
    match serde_json::to_vec(value) {
        Ok(body) => with_content_type(status, "application/json", Bytes::from(body)),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response body");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                "failed to serialize response",
            )
        }
    }
}

/// A plain-text response.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response<Bytes> {
    with_content_type(status, "text/plain; charset=utf-8", Bytes::from(body.into()))
}

/// An HTML response with status 200.
pub fn html(body: impl Into<Bytes>) -> Response<Bytes> {
    with_content_type(StatusCode::OK, "text/html; charset=utf-8", body.into())
}

/// A response without a body.
pub fn empty(status: StatusCode) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .unwrap_or_else(|_| Response::new(Bytes::new()))
}

/// A JSON error response: `{"error": {"code": .., "message": ..}}`.
pub fn error(status: StatusCode, code: &str, message: &str) -> Response<Bytes> {
    let body = serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    });
    with_content_type(status, "application/json", Bytes::from(body.to_string()))
}
