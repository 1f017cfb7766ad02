//! Test request building.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Uri};
use serde::Serialize;

use crate::error::TestError;

/// Builder for an in-memory request.
///
/// Header and body errors are recorded and reported by [`build`](Self::build)
/// so the builder chain never panics midway.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use scribe_test::TestRequest;
///
/// let request = TestRequest::new(Method::POST, "/pets")
///     .json(&serde_json::json!({"name": "Rex"}))
///     .build()
///     .unwrap();
/// assert_eq!(request.headers()["content-type"], "application/json");
/// ```
#[must_use]
#[derive(Debug)]
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
    error: Option<TestError>,
}

impl TestRequest {
    /// A request without headers or body.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            error: None,
        }
    }

    /// Sets a header, replacing earlier values.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        match (
            HeaderName::try_from(name),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error.get_or_insert(TestError::InvalidHeader {
                    name: name.to_string(),
                });
            }
        }
        self
    }

    /// Sets `Content-Type`.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets `Authorization: Bearer <token>`.
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        self.header(
            header::AUTHORIZATION.as_str(),
            format!("Bearer {}", token.as_ref()),
        )
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and `Content-Type: application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Bytes::from(bytes),
            Err(err) => {
                self.error.get_or_insert(TestError::Json(err));
            }
        }
        self.content_type("application/json")
    }

    /// Builds the request.
    pub fn build(self) -> Result<Request<Bytes>, TestError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let uri: Uri = self.uri.parse().map_err(|e: http::uri::InvalidUri| {
            TestError::InvalidUri {
                uri: self.uri.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut request = Request::new(self.body);
        *request.method_mut() = self.method;
        *request.uri_mut() = uri;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_simple() {
        let request = TestRequest::new(Method::GET, "/items?page=2").build().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().path(), "/items");
        assert_eq!(request.uri().query(), Some("page=2"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_headers() {
        let request = TestRequest::new(Method::GET, "/")
            .header("X-Trace", "abc")
            .bearer_token("t0ken")
            .build()
            .unwrap();
        assert_eq!(request.headers()["x-trace"], "abc");
        assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer t0ken");
    }

    #[test]
    fn test_invalid_header_surfaces_on_build() {
        let result = TestRequest::new(Method::GET, "/")
            .header("bad header", "x")
            .build();
        assert!(matches!(result, Err(TestError::InvalidHeader { .. })));
    }

    #[test]
    fn test_invalid_uri() {
        let result = TestRequest::new(Method::GET, "http://[::1").build();
        assert!(matches!(result, Err(TestError::InvalidUri { .. })));
    }

    #[test]
    fn test_json_body() {
        let request = TestRequest::new(Method::POST, "/")
            .json(&serde_json::json!({"a": 1}))
            .build()
            .unwrap();
        assert_eq!(request.body().as_ref(), br#"{"a":1}"#);
        assert_eq!(request.headers()[header::CONTENT_TYPE], "application/json");
    }
}
