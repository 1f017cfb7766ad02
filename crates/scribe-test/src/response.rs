//! Test response wrapper.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A dispatched response with assertion helpers.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl From<Response<Bytes>> for TestResponse {
    fn from(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

impl TestResponse {
    /// Response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response status as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// A header value as text.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// `Content-Type`, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<String, TestError> {
        Ok(String::from_utf8(self.body.to_vec())?)
    }

    /// Body deserialized from JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as an untyped JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// # Panics
    ///
    /// Panics if the status differs.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "expected status {expected}, got {} with body {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// # Panics
    ///
    /// Panics if the status code differs.
    #[track_caller]
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        assert_eq!(self.status.as_u16(), expected, "unexpected status");
        self
    }

    /// # Panics
    ///
    /// Panics unless the status is 2xx.
    #[track_caller]
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.status.is_success(),
            "expected success, got {} with body {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// # Panics
    ///
    /// Panics if the header is missing or differs.
    #[track_caller]
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let actual = self
            .header_str(name)
            .unwrap_or_else(|| panic!("header '{name}' not found"));
        assert_eq!(actual, expected.as_ref(), "header '{name}' mismatch");
        self
    }

    /// Asserts that `Content-Type` starts with `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or does not match.
    #[track_caller]
    pub fn assert_content_type(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let actual = self.content_type().unwrap_or_default();
        assert!(
            actual.starts_with(expected),
            "Content-Type: expected '{expected}', got '{actual}'"
        );
        self
    }
}
