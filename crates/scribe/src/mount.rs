//! Documentation routes: the Swagger UI page and the OpenAPI document.

use bytes::Bytes;
use http::{Method, Response, StatusCode};
use scribe_docs::SwaggerUi;
use scribe_router::{RouteId, RouteTable};

use crate::handler;

/// The two documentation routes mounted in the host table.
///
/// They live only in the routing table, never in the documented router, so
/// they do not appear in the generated document.
#[derive(Debug, Clone)]
pub(crate) struct DocsMount {
    ui: SwaggerUi,
    page: RouteId,
    spec: RouteId,
    html: Bytes,
}

/// Which documentation route a request hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocsRoute {
    Page,
    Spec,
}

impl DocsMount {
    /// Inserts `GET {path}/` and `GET {path}/openapi.json` into `table`.
    pub(crate) fn mount(ui: SwaggerUi, table: &mut RouteTable) -> Self {
        let page = RouteId::next();
        let spec = RouteId::next();

        for (path, id) in [(ui.page_path(), page), (ui.spec_path(), spec)] {
            if let Err(err) = table.route(&Method::GET, &path, id) {
                tracing::warn!(path = %path, error = %err, "failed to mount docs route");
            }
        }
        tracing::debug!(page = %ui.page_path(), spec = %ui.spec_path(), "mounted docs routes");

        let html = ui.html_bytes();
        Self {
            ui,
            page,
            spec,
            html,
        }
    }

    pub(crate) fn ui(&self) -> &SwaggerUi {
        &self.ui
    }

    pub(crate) fn route(&self, id: RouteId) -> Option<DocsRoute> {
        if id == self.page {
            Some(DocsRoute::Page)
        } else if id == self.spec {
            Some(DocsRoute::Spec)
        } else {
            None
        }
    }

    pub(crate) fn page_response(&self) -> Response<Bytes> {
        handler::html(self.html.clone())
    }
}

/// Answers the document route from an already compiled result.
///
/// Compilation failures become a 500 with a JSON error body.
pub(crate) fn spec_response<E: std::fmt::Display>(document: Result<String, E>) -> Response<Bytes> {
    match document {
        Ok(json) => Response::builder()
            .status(StatusCode::OK)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Bytes::from(json))
            .unwrap_or_else(|_| Response::new(Bytes::new())),
        Err(err) => {
            tracing::error!(error = %err, "failed to build OpenAPI document");
            handler::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DOCUMENT_ERROR",
                &format!("failed to build OpenAPI document: {err}"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_registers_both_routes() {
        let mut table = RouteTable::new();
        let mount = DocsMount::mount(SwaggerUi::new("/prefix/ui", "Demo"), &mut table);

        let page = table.match_route(&Method::GET, "/prefix/ui/").unwrap();
        assert_eq!(mount.route(page.route_id), Some(DocsRoute::Page));

        let spec = table
            .match_route(&Method::GET, "/prefix/ui/openapi.json")
            .unwrap();
        assert_eq!(mount.route(spec.route_id), Some(DocsRoute::Spec));

        assert_eq!(mount.route(RouteId::next()), None);
    }

    #[test]
    fn test_page_references_document() {
        let mut table = RouteTable::new();
        let mount = DocsMount::mount(SwaggerUi::new("/docs", "Demo"), &mut table);

        let response = mount.page_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = std::str::from_utf8(response.body()).unwrap();
        assert!(body.contains("/docs/openapi.json"));
    }

    #[test]
    fn test_spec_failure_is_server_error() {
        let response = spec_response::<&str>(Err("adapter exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("adapter exploded"));
    }

    #[test]
    fn test_spec_success() {
        let response = spec_response::<&str>(Ok("{}".to_string()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"{}");
    }
}
