//! OpenAPI document assembly.
//!
//! [`DocumentBuilder`] walks a [`Router`] once: it gathers every model the
//! operations reference, resolves them in a single adapter batch, then
//! renders each operation against the shared field mapping.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use regex::Regex;
use scribe_core::openapi::{
    Components, Info, OpenApi, PathItem, SecurityScheme, Server, OPENAPI_VERSION,
};
use scribe_core::{Router, SchemaInput, SchemarsAdapter, TypeSchemaAdapter};

use crate::error::DocsResult;

fn indent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n +").expect("valid indent regex"))
}

/// Removes indentation after line breaks so indented multi-line strings
/// render as plain paragraphs.
#[must_use]
pub fn collapse_description(description: &str) -> String {
    indent_regex().replace_all(description, "\n").into_owned()
}

/// Compiles routers into OpenAPI documents.
///
/// The builder holds no per-document state: every [`build`](Self::build)
/// produces a fresh document from the router as it is at that moment.
///
/// # Example
///
/// ```rust
/// use scribe_core::{RouteOptions, Router};
/// use scribe_docs::DocumentBuilder;
///
/// let mut router = Router::new();
/// router.get("/pets/<int:id>", RouteOptions::new().summary("Get a pet"));
///
/// let doc = DocumentBuilder::new().title("Pet Store").build(&router).unwrap();
/// assert!(doc.paths.contains_key("/pets/{id}"));
/// ```
#[derive(Clone)]
pub struct DocumentBuilder {
    title: String,
    description: String,
    version: String,
    servers: Vec<Server>,
    adapter: Arc<dyn TypeSchemaAdapter>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Builder with version `1.0.0` and the schemars adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            servers: Vec::new(),
            adapter: Arc::new(SchemarsAdapter::new()),
        }
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    /// Replace all servers.
    #[must_use]
    pub fn servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = servers;
        self
    }

    /// Use a different type-schema adapter.
    #[must_use]
    pub fn adapter(mut self, adapter: Arc<dyn TypeSchemaAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    /// Compiles `router` into a document.
    ///
    /// Fails only if the adapter rejects the whole batch. Individual fields
    /// the adapter cannot describe are dropped from their operations.
    pub fn build(&self, router: &Router) -> DocsResult<OpenApi> {
        let operations = router.operations();

        let inputs: Vec<SchemaInput<'_>> = operations
            .iter()
            .flat_map(|op| op.get_models())
            .map(SchemaInput::from_field)
            .collect();
        let generated = self.adapter.generate_definitions(&inputs)?;

        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        let mut security_schemes: IndexMap<String, SecurityScheme> = IndexMap::new();

        for operation in operations {
            paths
                .entry(operation.get_openapi_path())
                .or_default()
                .set(operation.method(), operation.get_schema(&generated.field_mapping));
            for auth in operation.auth_schemes() {
                security_schemes.extend(auth.schema());
            }
        }

        tracing::debug!(
            operations = operations.len(),
            models = inputs.len(),
            schemas = generated.definitions.len(),
            paths = paths.len(),
            "compiled OpenAPI document"
        );

        let description = collapse_description(&self.description);
        Ok(OpenApi {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: self.title.clone(),
                version: self.version.clone(),
                description: (!description.is_empty()).then_some(description),
            },
            servers: self.servers.clone(),
            components: Components {
                schemas: generated.definitions,
                security_schemes,
            },
            paths,
        })
    }

    /// Compiles `router` and serializes the document.
    pub fn build_json(&self, router: &Router) -> DocsResult<String> {
        let document = self.build(router)?;
        Ok(serde_json::to_string(&document)?)
    }
}

impl fmt::Debug for DocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentBuilder")
            .field("title", &self.title)
            .field("version", &self.version)
            .field("servers", &self.servers)
            .finish_non_exhaustive()
    }
}
