//! In-memory client for an [`Api`].

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use scribe::Api;
use serde::Serialize;

use crate::error::TestError;
use crate::request::TestRequest;
use crate::response::TestResponse;

/// Sends requests straight to [`Api::handle`] without a socket.
///
/// # Example
///
/// ```rust
/// use scribe::prelude::*;
/// use scribe_test::TestClient;
///
/// let mut api = Api::new(ApiOptions::new());
/// api.route(HttpMethod::Get, "/ping", RouteOptions::new(), |_ctx: RequestContext| async {
///     text(StatusCode::OK, "pong")
/// });
///
/// let client = TestClient::new(api);
/// let response = tokio_test::block_on(client.get("/ping").send());
/// response.assert_status(StatusCode::OK);
/// assert_eq!(response.text().unwrap(), "pong");
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestClient {
    api: Arc<Api>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Client owning `api`.
    pub fn new(api: Api) -> Self {
        Self::from_arc(Arc::new(api))
    }

    /// Client sharing `api`.
    pub fn from_arc(api: Arc<Api>) -> Self {
        Self {
            api,
            default_headers: Vec::new(),
        }
    }

    /// The API under test.
    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// GET request.
    ///
    /// Query strings are passed through to the handler as-is.
    ///
    /// ```rust
    /// use scribe::prelude::*;
    /// use scribe_test::TestClient;
    ///
    /// let mut api = Api::default();
    /// api.route(HttpMethod::Get, "/pets/<int:id>", RouteOptions::new(), |ctx: RequestContext| async move {
    ///     let id = ctx.param_as::<u64>("id").unwrap_or_default();
    ///     let verbose = ctx.query().is_some_and(|q| q.contains("verbose"));
    ///     text(StatusCode::OK, format!("{id}:{verbose}"))
    /// });
    ///
    /// let client = TestClient::new(api);
    /// let response = tokio_test::block_on(client.get("/pets/7?verbose=1").send());
    /// response.assert_status(StatusCode::OK);
    /// assert_eq!(response.text().unwrap(), "7:true");
    ///
    /// let missing = tokio_test::block_on(client.get("/pets/seven").send());
    /// missing.assert_status(StatusCode::NOT_FOUND);
    /// ```
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// PUT request.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// PATCH request.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// DELETE request.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let request = self
            .default_headers
            .iter()
            .fold(TestRequest::new(method, uri), |request, (name, value)| {
                request.header(name, value)
            });
        TestClientRequest {
            client: self,
            request,
        }
    }
}

/// A request bound to a [`TestClient`].
#[must_use]
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    request: TestRequest,
}

impl TestClientRequest<'_> {
    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Sets `Content-Type`.
    pub fn content_type(mut self, content_type: impl AsRef<str>) -> Self {
        self.request = self.request.content_type(content_type);
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    pub fn bearer_token(mut self, token: impl AsRef<str>) -> Self {
        self.request = self.request.bearer_token(token);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request = self.request.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.request = self.request.json(value);
        self
    }

    /// Dispatches the request.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.request.build()?;
        Ok(self.client.api.handle(request).await.into())
    }

    /// Dispatches the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(err) => panic!("failed to build test request: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use scribe::prelude::*;

    fn echo_api() -> Api {
        let mut api = Api::new(ApiOptions::new());
        let echo = |ctx: RequestContext| async move {
            let auth = ctx
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            json(
                StatusCode::OK,
                &serde_json::json!({
                    "method": ctx.method().as_str(),
                    "auth": auth,
                    "body": String::from_utf8_lossy(ctx.body()),
                }),
            )
        };
        api.route(HttpMethod::Get, "/echo", RouteOptions::new(), echo);
        api.route(HttpMethod::Post, "/echo", RouteOptions::new(), echo);
        api
    }

    #[tokio::test]
    async fn test_get() {
        let client = TestClient::new(echo_api());
        let body = client.get("/echo").send().await.json_value().unwrap();
        assert_eq!(body["method"], "GET");
    }

    #[tokio::test]
    async fn test_default_headers() {
        let client = TestClient::new(echo_api()).with_default_header("Authorization", "Bearer a");
        let body = client.get("/echo").send().await.json_value().unwrap();
        assert_eq!(body["auth"], "Bearer a");

        let body = client
            .get("/echo")
            .bearer_token("b")
            .send()
            .await
            .json_value()
            .unwrap();
        assert_eq!(body["auth"], "Bearer b");
    }

    #[tokio::test]
    async fn test_post_json() {
        let client = TestClient::new(echo_api());
        let body = client
            .post("/echo")
            .json(&serde_json::json!({"x": 1}))
            .send()
            .await
            .json_value()
            .unwrap();
        assert_eq!(body["body"], r#"{"x":1}"#);
    }

    #[tokio::test]
    async fn test_try_send_reports_bad_header() {
        let client = TestClient::new(echo_api());
        let result = client.get("/echo").header("bad header", "x").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidHeader { .. })));
    }

    #[tokio::test]
    async fn test_shared_api() {
        let api = Arc::new(echo_api());
        let first = TestClient::from_arc(Arc::clone(&api));
        let second = TestClient::from_arc(api);
        first.get("/echo").send().await.assert_success();
        second.delete("/echo").send().await.assert_status_code(405);
    }
}
