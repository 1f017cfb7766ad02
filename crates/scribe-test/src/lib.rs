//! # Scribe Test
//!
//! In-memory testing for scribe APIs: requests go straight to
//! [`scribe::Api::handle`], with no socket or port involved.
//!
//! ```rust
//! use scribe::prelude::*;
//! use scribe_test::TestClient;
//!
//! # tokio_test::block_on(async {
//! let mut api = Api::new(ApiOptions::new().title("Demo"));
//! api.get("/unbound", RouteOptions::new());
//!
//! let client = TestClient::new(api);
//! client.get("/unbound").send().await.assert_status(StatusCode::NOT_IMPLEMENTED);
//!
//! let doc = client.get("/docs/openapi.json").send().await;
//! doc.assert_success().assert_content_type("application/json");
//! assert!(doc.json_value().unwrap()["paths"]["/unbound"]["get"].is_object());
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/scribe-test/0.1.0")]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::TestRequest;
pub use response::TestResponse;
