//! The [`Api`] facade: documented routes, handlers, and dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::ALLOW;
use http::{HeaderValue, Request, Response, StatusCode};
use scribe_config::{ApiKeyIn, AuthKind, AuthSection, ConfigError, DocExpansionSetting, ScribeConfig};
use scribe_core::openapi::{OpenApi, Server};
use scribe_core::{
    ApiKeyAuth, ApiKeyLocation, AuthScheme, BasicAuth, BearerAuth, HttpMethod, RouteBinding,
    RouteId, RouteOptions, Router, TypeSchemaAdapter,
};
use scribe_docs::{DocExpansion, DocsResult, DocumentBuilder, SwaggerUi};
use scribe_router::RouteTable;

use crate::mount::{self, DocsMount, DocsRoute};
use crate::handler::{self, Handler, RequestContext};

/// Settings for an [`Api`].
///
/// # Example
///
/// ```rust
/// use scribe::ApiOptions;
///
/// let options = ApiOptions::new()
///     .title("Pet Store")
///     .prefix("/api")
///     .docs_url("/ui");
/// assert_eq!(options.docs_path(), "/api/ui");
/// ```
#[derive(Clone)]
pub struct ApiOptions {
    title: String,
    description: String,
    version: String,
    servers: Vec<Server>,
    prefix: String,
    docs_url: String,
    auth: Option<Arc<dyn AuthScheme>>,
    docs_enabled: bool,
    page_title: Option<String>,
    swagger_version: Option<String>,
    doc_expansion: DocExpansion,
    adapter: Option<Arc<dyn TypeSchemaAdapter>>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiOptions")
            .field("title", &self.title)
            .field("version", &self.version)
            .field("prefix", &self.prefix)
            .field("docs_url", &self.docs_url)
            .field("auth", &self.auth)
            .field("docs_enabled", &self.docs_enabled)
            .finish_non_exhaustive()
    }
}

impl ApiOptions {
    /// Version `1.0.0`, no prefix, docs at `/docs`, no default auth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            servers: Vec::new(),
            prefix: String::new(),
            docs_url: "/docs".to_string(),
            auth: None,
            docs_enabled: true,
            page_title: None,
            swagger_version: None,
            doc_expansion: DocExpansion::default(),
            adapter: None,
        }
    }

    /// Document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Document description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// API version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a server entry.
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    /// Prefix for every route and for the docs mount point.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Docs mount point below the prefix.
    pub fn docs_url(mut self, docs_url: impl Into<String>) -> Self {
        self.docs_url = docs_url.into();
        self
    }

    /// Default auth for routes registered on the API.
    pub fn auth(mut self, auth: impl AuthScheme + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Default auth from a shared scheme.
    pub fn auth_arc(mut self, auth: Arc<dyn AuthScheme>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Mount the docs routes. Enabled by default.
    pub fn docs_enabled(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Title of the docs page.
    pub fn page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Swagger UI version loaded by the docs page.
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = Some(version.into());
        self
    }

    /// Initial expansion of the docs page.
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// Type-schema adapter used to compile the document.
    pub fn adapter(mut self, adapter: Arc<dyn TypeSchemaAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// `prefix + docs_url`.
    #[must_use]
    pub fn docs_path(&self) -> String {
        format!("{}{}", self.prefix, self.docs_url)
    }

    /// Options equivalent to a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn from_config(config: &ScribeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut options = Self::new()
            .title(config.api.title.clone())
            .description(config.api.description.clone())
            .version(config.api.version.clone())
            .prefix(config.api.prefix.clone())
            .docs_url(config.api.docs_url.clone())
            .docs_enabled(config.docs.enabled)
            .swagger_version(config.docs.swagger_version.clone())
            .doc_expansion(match config.docs.doc_expansion {
                DocExpansionSetting::None => DocExpansion::None,
                DocExpansionSetting::List => DocExpansion::List,
                DocExpansionSetting::Full => DocExpansion::Full,
            });

        for entry in &config.api.servers {
            let mut server = Server::new(entry.url.clone());
            if let Some(description) = &entry.description {
                server = server.with_description(description.clone());
            }
            options = options.server(server);
        }
        if let Some(title) = &config.docs.page_title {
            options = options.page_title(title.clone());
        }
        if let Some(auth) = auth_from_config(&config.auth)? {
            options = options.auth_arc(auth);
        }

        Ok(options)
    }
}

fn auth_from_config(section: &AuthSection) -> Result<Option<Arc<dyn AuthScheme>>, ConfigError> {
    let scheme: Arc<dyn AuthScheme> = match section.scheme {
        AuthKind::None => return Ok(None),
        AuthKind::Bearer => {
            let mut bearer = BearerAuth::new();
            if let Some(name) = &section.name {
                bearer = bearer.named(name.clone());
            }
            if let Some(format) = &section.bearer_format {
                bearer = bearer.with_format(format.clone());
            }
            Arc::new(bearer)
        }
        AuthKind::Basic => {
            let mut basic = BasicAuth::new();
            if let Some(name) = &section.name {
                basic = basic.named(name.clone());
            }
            Arc::new(basic)
        }
        AuthKind::ApiKey => {
            let key_name = section
                .api_key_name
                .clone()
                .ok_or_else(|| ConfigError::validation_error("auth.api_key_name is required"))?;
            let location = match section.api_key_in {
                ApiKeyIn::Header => ApiKeyLocation::Header,
                ApiKeyIn::Query => ApiKeyLocation::Query,
                ApiKeyIn::Cookie => ApiKeyLocation::Cookie,
            };
            let mut api_key = ApiKeyAuth::new(key_name, location);
            if let Some(name) = &section.name {
                api_key = api_key.named(name.clone());
            }
            Arc::new(api_key)
        }
    };
    Ok(Some(scheme))
}

/// A documented API bound to an in-process dispatcher.
///
/// Routes registered here are recorded in a [`Router`] for documentation and
/// inserted into a [`RouteTable`] for dispatch. Handlers are attached to the
/// returned [`RouteBinding`]s; the documentation side never calls them.
///
/// # Example
///
/// ```rust
/// use scribe::prelude::*;
///
/// let mut api = Api::new(ApiOptions::new().title("Demo"));
/// let ping = api.get("/ping", RouteOptions::new().summary("Liveness"));
/// api.bind(&ping, |_ctx: RequestContext| async {
///     text(StatusCode::OK, "pong")
/// });
///
/// let doc = api.openapi().unwrap();
/// assert!(doc.paths.contains_key("/ping"));
/// ```
pub struct Api {
    router: Router,
    table: RouteTable,
    handlers: HashMap<RouteId, Arc<dyn Handler>>,
    builder: DocumentBuilder,
    docs: Option<DocsMount>,
    prefix: String,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("prefix", &self.prefix)
            .field("operations", &self.router.len())
            .field("handlers", &self.handlers.len())
            .field("docs", &self.docs.as_ref().map(|d| d.ui().path().to_string()))
            .finish_non_exhaustive()
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new(ApiOptions::default())
    }
}

impl Api {
    /// Creates an API and mounts its docs routes.
    #[must_use]
    pub fn new(options: ApiOptions) -> Self {
        let router = match &options.auth {
            Some(auth) => Router::with_auth(Arc::clone(auth)),
            None => Router::new(),
        };

        let mut builder = DocumentBuilder::new()
            .title(options.title.clone())
            .description(options.description.clone())
            .version(options.version.clone())
            .servers(options.servers.clone());
        if let Some(adapter) = &options.adapter {
            builder = builder.adapter(Arc::clone(adapter));
        }

        let mut table = RouteTable::new();
        let docs = options.docs_enabled.then(|| {
            let mut ui = SwaggerUi::new(options.docs_path(), &options.title)
                .doc_expansion(options.doc_expansion);
            if let Some(title) = &options.page_title {
                ui = ui.title(title.clone());
            }
            if let Some(version) = &options.swagger_version {
                ui = ui.swagger_version(version.clone());
            }
            DocsMount::mount(ui, &mut table)
        });

        Self {
            router,
            table,
            handlers: HashMap::new(),
            builder,
            docs,
            prefix: options.prefix,
        }
    }

    /// Creates an API from a configuration file's contents.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn from_config(config: &ScribeConfig) -> Result<Self, ConfigError> {
        ApiOptions::from_config(config).map(Self::new)
    }

    /// Records a route under the API prefix and inserts it for dispatch.
    pub fn add_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        options: RouteOptions,
    ) -> RouteBinding {
        let binding = self
            .router
            .add_route(method, format!("{}{}", self.prefix, path), options);
        self.insert(&binding);
        binding
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: &str, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Get, path, options)
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: &str, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Post, path, options)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: &str, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Put, path, options)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: &str, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Patch, path, options)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: &str, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Delete, path, options)
    }

    /// Registers a route and binds `handler` to it.
    pub fn route<H: Handler>(
        &mut self,
        method: HttpMethod,
        path: &str,
        options: RouteOptions,
        handler: H,
    ) -> RouteBinding {
        let binding = self.add_route(method, path, options);
        self.bind(&binding, handler);
        binding
    }

    /// Attaches `handler` to a registered route, replacing any earlier one.
    pub fn bind<H: Handler>(&mut self, binding: &RouteBinding, handler: H) -> &mut Self {
        self.handlers.insert(binding.route_id, Arc::new(handler));
        self
    }

    /// Merges `router` under `api prefix + prefix`.
    ///
    /// Route ids are kept, so bindings taken from `router` before the merge
    /// can still be bound on the API.
    pub fn add_router(&mut self, router: &Router, prefix: &str) -> Vec<RouteBinding> {
        let full_prefix = format!("{}{}", self.prefix, prefix);
        let bindings = self.router.add_router(router, &full_prefix);
        for binding in &bindings {
            self.insert(binding);
        }
        bindings
    }

    fn insert(&mut self, binding: &RouteBinding) {
        let method = http::Method::from(binding.method);
        if let Err(err) = self.table.route(&method, &binding.path, binding.route_id) {
            tracing::warn!(
                route_id = %binding.route_id,
                path = %binding.path,
                error = %err,
                "route recorded for documentation but not dispatchable"
            );
        }
    }

    /// Compiles a fresh document from the current routes.
    pub fn openapi(&self) -> DocsResult<OpenApi> {
        self.builder.build(&self.router)
    }

    /// The compiled document as JSON.
    pub fn openapi_json(&self) -> DocsResult<String> {
        self.builder.build_json(&self.router)
    }

    /// The documented routes.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Route prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of the docs page, if mounted.
    #[must_use]
    pub fn docs_path(&self) -> Option<String> {
        self.docs.as_ref().map(|d| d.ui().page_path())
    }

    /// Path of the document route, if mounted.
    #[must_use]
    pub fn spec_path(&self) -> Option<String> {
        self.docs.as_ref().map(|d| d.ui().spec_path())
    }

    /// Dispatches a request.
    ///
    /// - unknown path, or a value rejected by a converter: `404`
    /// - known path without the method: `405` with `Allow`
    /// - known route without a handler: `501`
    pub async fn handle(&self, request: Request<Bytes>) -> Response<Bytes> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let Some((methods, params)) = self.table.match_path(&path) else {
            tracing::debug!(method = %method, path = %path, status = 404, "no route");
            return handler::error(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("no route for {path}"),
            );
        };

        let Some(route_id) = methods.route(&method) else {
            tracing::debug!(method = %method, path = %path, status = 405, "method not allowed");
            return method_not_allowed(&method, &methods.allowed_methods());
        };

        if let Some(mount) = &self.docs {
            match mount.route(route_id) {
                Some(DocsRoute::Page) => return mount.page_response(),
                Some(DocsRoute::Spec) => return mount::spec_response(self.openapi_json()),
                None => {}
            }
        }

        let Some(handler) = self.handlers.get(&route_id).cloned() else {
            tracing::warn!(route_id = %route_id, path = %path, "no handler bound");
            return handler::error(
                StatusCode::NOT_IMPLEMENTED,
                "HANDLER_NOT_IMPLEMENTED",
                &format!("no handler bound for {method} {path}"),
            );
        };

        let response = handler
            .call(RequestContext::new(route_id, params, request))
            .await;
        tracing::debug!(
            route_id = %route_id,
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            "handled request"
        );
        response
    }
}

fn method_not_allowed(method: &http::Method, allowed: &[http::Method]) -> Response<Bytes> {
    let mut response = handler::error(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        &format!("method {method} not allowed"),
    );
    let allow = allowed
        .iter()
        .map(http::Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_config::ServerEntry;

    fn request(method: http::Method, uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_prefix_applies_to_routes() {
        let mut api = Api::new(ApiOptions::new().prefix("/v1"));
        let binding = api.get("/items/<int:id>", RouteOptions::new());

        assert_eq!(binding.path, "/v1/items/<int:id>");
        assert_eq!(api.router().operations()[0].get_openapi_path(), "/v1/items/{id}");
    }

    #[test]
    fn test_docs_paths() {
        let api = Api::new(ApiOptions::new().prefix("/prefix").docs_url("/ui"));
        assert_eq!(api.docs_path().as_deref(), Some("/prefix/ui/"));
        assert_eq!(api.spec_path().as_deref(), Some("/prefix/ui/openapi.json"));

        let hidden = Api::new(ApiOptions::new().docs_enabled(false));
        assert!(hidden.docs_path().is_none());
    }

    #[test]
    fn test_default_auth_reaches_document() {
        let mut api = Api::new(ApiOptions::new().auth(BearerAuth::new()));
        api.get("/secure", RouteOptions::new());
        api.get("/open", RouteOptions::new().no_auth());

        let doc = api.openapi().unwrap();
        assert_eq!(doc.paths["/secure"].get.as_ref().unwrap().security.len(), 1);
        assert!(doc.paths["/open"].get.as_ref().unwrap().security.is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = ScribeConfig::default();
        config.api.title = "Configured".to_string();
        config.api.prefix = "/prefix".to_string();
        config.api.docs_url = "/ui".to_string();
        config.api.servers.push(ServerEntry {
            url: "https://api.example.com".to_string(),
            description: Some("prod".to_string()),
        });
        config.auth.scheme = AuthKind::ApiKey;
        config.auth.api_key_name = Some("X-Key".to_string());

        let options = ApiOptions::from_config(&config).unwrap();
        assert_eq!(options.docs_path(), "/prefix/ui");
        assert_eq!(options.servers.len(), 1);
        assert!(options.auth.is_some());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ScribeConfig::default();
        config.api.prefix = "prefix".to_string();
        assert!(Api::from_config(&config).is_err());
    }

    #[test]
    fn test_auth_kinds_from_config() {
        let none = AuthSection::default();
        assert!(auth_from_config(&none).unwrap().is_none());

        let bearer = AuthSection {
            scheme: AuthKind::Bearer,
            name: Some("Jwt".to_string()),
            bearer_format: Some("JWT".to_string()),
            ..AuthSection::default()
        };
        let scheme = auth_from_config(&bearer).unwrap().unwrap();
        assert!(scheme.schema().contains_key("Jwt"));

        let basic = AuthSection {
            scheme: AuthKind::Basic,
            ..AuthSection::default()
        };
        assert!(auth_from_config(&basic).unwrap().is_some());

        let missing_key = AuthSection {
            scheme: AuthKind::ApiKey,
            ..AuthSection::default()
        };
        assert!(auth_from_config(&missing_key).is_err());
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let api = Api::default();
        let response = api.handle(request(http::Method::GET, "/missing")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_lists_allowed() {
        let mut api = Api::default();
        api.get("/things", RouteOptions::new());
        api.post("/things", RouteOptions::new());

        let response = api.handle(request(http::Method::DELETE, "/things")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, POST");
    }

    #[tokio::test]
    async fn test_unbound_route_is_not_implemented() {
        let mut api = Api::default();
        api.get("/todo", RouteOptions::new());

        let response = api.handle(request(http::Method::GET, "/todo")).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
