//! Route metadata and its OpenAPI rendering.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use scribe_router::RouteId;
use serde_json::Value;

use crate::auth::{AuthScheme, AuthSetting};
use crate::field::{FieldKey, FieldMode, ModelField};
use crate::method::HttpMethod;
use crate::openapi::{self, MediaType, Parameter, ParameterIn, PathItem, RequestBody, Response};
use crate::path::{self, PathParam};

/// Default description for a status code.
#[must_use]
pub fn default_description(status: u16) -> &'static str {
    match status {
        200 => "Successful response",
        201 => "Created",
        204 => "No content",
        _ => "Response",
    }
}

/// One declared response.
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    /// Human-readable description.
    pub description: String,
    /// Body model, if the response has one.
    pub model: Option<ModelField>,
}

impl ResponseSpec {
    /// A response without a body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            description: default_description(status).to_string(),
            model: None,
        }
    }

    /// A JSON response carrying `T`.
    #[must_use]
    pub fn json<T: schemars::JsonSchema>(status: u16) -> Self {
        Self {
            description: default_description(status).to_string(),
            model: Some(ModelField::body::<T>()),
        }
    }

    /// Replaces the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Named group of operations the API calls back.
///
/// Callback operation paths are runtime expressions such as
/// `{$request.body#/callbackUrl}`.
#[derive(Debug, Clone)]
pub struct Callback {
    /// Callback name, the key under the operation's `callbacks`.
    pub name: String,
    /// Operations invoked on the callback target.
    pub operations: Vec<Operation>,
}

impl Callback {
    /// Empty callback.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Adds an operation at `expression`.
    #[must_use]
    pub fn route(mut self, method: HttpMethod, expression: impl Into<String>, options: RouteOptions) -> Self {
        self.operations
            .push(Operation::from_options(method, expression, options, None));
        self
    }
}

/// Everything a route can declare besides method and path.
///
/// ```rust
/// use scribe_core::{ModelField, ResponseSpec, RouteOptions};
///
/// let options = RouteOptions::new()
///     .summary("List pets")
///     .param(ModelField::query::<u32>("limit").optional())
///     .response(200, ResponseSpec::json::<Vec<String>>(200));
/// assert_eq!(options.params.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Declared responses keyed by status code.
    pub responses: IndexMap<u16, ResponseSpec>,
    /// Auth setting.
    pub auth: AuthSetting,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Explicit `operationId`.
    pub operation_id: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Parameters and body, in declaration order.
    pub params: Vec<ModelField>,
    /// Callbacks.
    pub callbacks: Vec<Callback>,
}

impl RouteOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a response.
    #[must_use]
    pub fn response(mut self, status: u16, response: ResponseSpec) -> Self {
        self.responses.insert(status, response);
        self
    }

    /// Declares a JSON response of `T` with the default description.
    #[must_use]
    pub fn returns<T: schemars::JsonSchema>(self, status: u16) -> Self {
        self.response(status, ResponseSpec::json::<T>(status))
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, field: ModelField) -> Self {
        self.params.push(field);
        self
    }

    /// Adds a JSON request body of `T`.
    #[must_use]
    pub fn body<T: schemars::JsonSchema>(self) -> Self {
        self.param(ModelField::body::<T>())
    }

    /// Sets the auth setting.
    #[must_use]
    pub fn auth(mut self, auth: AuthSetting) -> Self {
        self.auth = auth;
        self
    }

    /// Protects the route with `scheme`.
    #[must_use]
    pub fn auth_scheme(self, scheme: impl AuthScheme + 'static) -> Self {
        self.auth(AuthSetting::scheme(scheme))
    }

    /// Opts out of the router's default auth.
    #[must_use]
    pub fn no_auth(self) -> Self {
        self.auth(AuthSetting::Disabled)
    }

    /// Sets the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the `operationId`.
    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Marks the route deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Adds a callback.
    #[must_use]
    pub fn callback(mut self, callback: Callback) -> Self {
        self.callbacks.push(callback);
        self
    }
}

/// One registered (method, path) pair and everything declared about it.
///
/// Operations are not modified after construction. Merging a router under a
/// prefix produces copies with a new path and the same [`RouteId`].
#[derive(Clone)]
pub struct Operation {
    route_id: RouteId,
    method: HttpMethod,
    path: String,
    responses: IndexMap<u16, ResponseSpec>,
    auth: Option<Arc<dyn AuthScheme>>,
    summary: Option<String>,
    description: Option<String>,
    operation_id: Option<String>,
    tags: Vec<String>,
    deprecated: bool,
    params: Vec<ModelField>,
    callbacks: Vec<Callback>,
}

impl Operation {
    /// Builds an operation, resolving [`AuthSetting::NotSet`] to `default_auth`.
    pub fn from_options(
        method: HttpMethod,
        path: impl Into<String>,
        options: RouteOptions,
        default_auth: Option<&Arc<dyn AuthScheme>>,
    ) -> Self {
        Self {
            route_id: RouteId::next(),
            method,
            path: path.into(),
            auth: options.auth.resolve(default_auth),
            responses: options.responses,
            summary: options.summary,
            description: options.description,
            operation_id: options.operation_id,
            tags: options.tags,
            deprecated: options.deprecated,
            params: options.params,
            callbacks: options.callbacks,
        }
    }

    /// Stable identity, shared by every prefixed copy.
    #[must_use]
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Native path, including any prefixes applied by merging.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Auth scheme, if any.
    #[must_use]
    pub fn auth(&self) -> Option<&Arc<dyn AuthScheme>> {
        self.auth.as_ref()
    }

    /// Declared parameters and body.
    #[must_use]
    pub fn params(&self) -> &[ModelField] {
        &self.params
    }

    /// Declared responses.
    #[must_use]
    pub fn responses(&self) -> &IndexMap<u16, ResponseSpec> {
        &self.responses
    }

    /// Declared callbacks.
    #[must_use]
    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub(crate) fn with_prefix(&self, prefix: &str) -> Self {
        let mut operation = self.clone();
        operation.path = format!("{prefix}{}", self.path);
        operation
    }

    /// Every model this operation references: parameters, body, response
    /// models, then callbacks recursively. Duplicates are kept.
    #[must_use]
    pub fn get_models(&self) -> Vec<&ModelField> {
        let mut models: Vec<&ModelField> = self.params.iter().collect();
        models.extend(self.responses.values().filter_map(|r| r.model.as_ref()));
        for callback in &self.callbacks {
            for operation in &callback.operations {
                models.extend(operation.get_models());
            }
        }
        models
    }

    /// Auth schemes used by this operation and, recursively, its callbacks.
    ///
    /// Every scheme named in a rendered `security` requirement is in here.
    #[must_use]
    pub fn auth_schemes(&self) -> Vec<&Arc<dyn AuthScheme>> {
        let mut schemes: Vec<&Arc<dyn AuthScheme>> = self.auth.iter().collect();
        for callback in &self.callbacks {
            for operation in &callback.operations {
                schemes.extend(operation.auth_schemes());
            }
        }
        schemes
    }

    /// The OpenAPI path template for this operation.
    #[must_use]
    pub fn get_openapi_path(&self) -> String {
        path::translate(&self.path).template
    }

    /// Renders the OpenAPI operation object.
    ///
    /// Fields missing from `field_mapping` are left out with a warning.
    #[must_use]
    pub fn get_schema(&self, field_mapping: &IndexMap<FieldKey, Value>) -> openapi::Operation {
        let template = path::translate(&self.path);

        let mut parameters = Vec::new();
        let mut request_body = None;

        for param in &template.params {
            let explicit = self
                .params
                .iter()
                .find(|f| f.mode() == FieldMode::Path && f.name() == param.name);
            let resolved = explicit.and_then(|f| self.field_parameter(f, field_mapping));
            parameters.push(resolved.unwrap_or_else(|| implicit_parameter(param)));
        }

        for field in &self.params {
            match field.mode() {
                FieldMode::Body => {
                    if let Some(schema) = self.lookup(field, field_mapping) {
                        request_body = Some(RequestBody {
                            description: field.description().map(ToString::to_string),
                            required: field.is_required(),
                            content: MediaType::json(schema),
                        });
                    }
                }
                FieldMode::Path
                    if template.params.iter().any(|p| p.name == field.name()) => {}
                _ => parameters.extend(self.field_parameter(field, field_mapping)),
            }
        }

        openapi::Operation {
            operation_id: self.operation_id.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            deprecated: self.deprecated,
            parameters,
            request_body,
            responses: self.response_objects(field_mapping),
            callbacks: self.callback_objects(field_mapping),
            security: self
                .auth
                .as_ref()
                .map(|auth| auth.requirements())
                .unwrap_or_default(),
        }
    }

    fn lookup(&self, field: &ModelField, field_mapping: &IndexMap<FieldKey, Value>) -> Option<Value> {
        let schema = field_mapping.get(&field.key()).cloned();
        if schema.is_none() {
            tracing::warn!(
                method = %self.method,
                path = %self.path,
                field = field.name(),
                "no schema for field, omitting it"
            );
        }
        schema
    }

    fn field_parameter(
        &self,
        field: &ModelField,
        field_mapping: &IndexMap<FieldKey, Value>,
    ) -> Option<Parameter> {
        let location = field.mode().parameter_in()?;
        let schema = self.lookup(field, field_mapping)?;
        Some(Parameter {
            name: field.name().to_string(),
            location,
            description: field.description().map(ToString::to_string),
            required: field.is_required(),
            schema: Some(schema),
        })
    }

    fn response_objects(&self, field_mapping: &IndexMap<FieldKey, Value>) -> IndexMap<String, Response> {
        if self.responses.is_empty() {
            let mut responses = IndexMap::new();
            responses.insert(
                "200".to_string(),
                Response {
                    description: default_description(200).to_string(),
                    content: IndexMap::new(),
                },
            );
            return responses;
        }

        self.responses
            .iter()
            .map(|(status, spec)| {
                let content = spec
                    .model
                    .as_ref()
                    .and_then(|model| self.lookup(model, field_mapping))
                    .map(MediaType::json)
                    .unwrap_or_default();
                (
                    status.to_string(),
                    Response {
                        description: spec.description.clone(),
                        content,
                    },
                )
            })
            .collect()
    }

    fn callback_objects(
        &self,
        field_mapping: &IndexMap<FieldKey, Value>,
    ) -> IndexMap<String, openapi::Callback> {
        let mut callbacks = IndexMap::new();
        for callback in &self.callbacks {
            let entry: &mut openapi::Callback = callbacks.entry(callback.name.clone()).or_default();
            for operation in &callback.operations {
                entry
                    .entry(operation.get_openapi_path())
                    .or_insert_with(PathItem::default)
                    .set(operation.method, operation.get_schema(field_mapping));
            }
        }
        callbacks
    }
}

fn implicit_parameter(param: &PathParam) -> Parameter {
    Parameter {
        name: param.name.clone(),
        location: ParameterIn::Path,
        description: None,
        required: true,
        schema: Some(param.schema()),
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("route_id", &self.route_id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("auth", &self.auth)
            .field("params", &self.params)
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{SchemaInput, SchemarsAdapter, TypeSchemaAdapter};
    use crate::auth::BearerAuth;
    use schemars::JsonSchema;
    use serde_json::json;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Pet {
        name: String,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Event {
        kind: String,
    }

    fn mapping(operation: &Operation) -> IndexMap<FieldKey, Value> {
        let inputs: Vec<SchemaInput<'_>> = operation
            .get_models()
            .into_iter()
            .map(SchemaInput::from_field)
            .collect();
        SchemarsAdapter::new()
            .generate_definitions(&inputs)
            .unwrap()
            .field_mapping
    }

    fn render(operation: &Operation) -> Value {
        serde_json::to_value(operation.get_schema(&mapping(operation))).unwrap()
    }

    #[test]
    fn test_path_params_are_inferred() {
        let op = Operation::from_options(HttpMethod::Get, "/pets/<int:id>", RouteOptions::new(), None);
        let schema = render(&op);

        assert_eq!(op.get_openapi_path(), "/pets/{id}");
        assert_eq!(
            schema["parameters"],
            json!([{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}])
        );
    }

    #[test]
    fn test_explicit_path_field_wins() {
        let options = RouteOptions::new().param(ModelField::path::<String>("id").describe("Pet id"));
        let op = Operation::from_options(HttpMethod::Get, "/pets/<int:id>", options, None);
        let schema = render(&op);

        let params = schema["parameters"].as_array().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0]["schema"]["type"], "string");
        assert_eq!(params[0]["description"], "Pet id");
    }

    #[test]
    fn test_query_header_and_body() {
        let options = RouteOptions::new()
            .param(ModelField::query::<u32>("limit").optional())
            .param(ModelField::header::<String>("x-trace"))
            .body::<Pet>();
        let op = Operation::from_options(HttpMethod::Post, "/pets", options, None);
        let schema = render(&op);

        assert_eq!(schema["parameters"][0]["in"], "query");
        assert_eq!(schema["parameters"][0]["required"], false);
        assert_eq!(schema["parameters"][1]["in"], "header");
        assert_eq!(
            schema["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Pet"
        );
        assert_eq!(schema["requestBody"]["required"], true);
    }

    #[test]
    fn test_default_response() {
        let op = Operation::from_options(HttpMethod::Get, "/", RouteOptions::new(), None);
        assert_eq!(
            render(&op)["responses"],
            json!({"200": {"description": "Successful response"}})
        );
    }

    #[test]
    fn test_response_models() {
        let options = RouteOptions::new()
            .returns::<Pet>(201)
            .response(404, ResponseSpec::new(404).describe("Not found"));
        let op = Operation::from_options(HttpMethod::Post, "/pets", options, None);
        let schema = render(&op);

        assert_eq!(schema["responses"]["201"]["description"], "Created");
        assert_eq!(
            schema["responses"]["201"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Pet"
        );
        assert_eq!(schema["responses"]["404"], json!({"description": "Not found"}));
    }

    #[test]
    fn test_unresolvable_field_is_omitted() {
        let options = RouteOptions::new()
            .param(ModelField::query::<u32>("limit"))
            .body::<Pet>();
        let op = Operation::from_options(HttpMethod::Post, "/pets", options, None);
        let schema = serde_json::to_value(op.get_schema(&IndexMap::new())).unwrap();

        assert!(schema.get("parameters").is_none());
        assert!(schema.get("requestBody").is_none());
        assert!(schema.get("responses").is_some());
    }

    #[test]
    fn test_security_only_with_auth() {
        let plain = Operation::from_options(HttpMethod::Get, "/", RouteOptions::new(), None);
        assert!(render(&plain).get("security").is_none());

        let secured = Operation::from_options(
            HttpMethod::Get,
            "/",
            RouteOptions::new().auth_scheme(BearerAuth::new()),
            None,
        );
        assert_eq!(render(&secured)["security"], json!([{"BearerAuth": []}]));
    }

    #[test]
    fn test_default_auth_resolution() {
        let default: Arc<dyn AuthScheme> = Arc::new(BearerAuth::new());

        let inherited = Operation::from_options(HttpMethod::Get, "/", RouteOptions::new(), Some(&default));
        assert!(inherited.auth().is_some());

        let disabled =
            Operation::from_options(HttpMethod::Get, "/", RouteOptions::new().no_auth(), Some(&default));
        assert!(disabled.auth().is_none());
    }

    #[test]
    fn test_callbacks_render_and_contribute_models() {
        let callback = Callback::new("onEvent").route(
            HttpMethod::Post,
            "{$request.body#/callbackUrl}",
            RouteOptions::new().body::<Event>(),
        );
        let options = RouteOptions::new().body::<Pet>().callback(callback);
        let op = Operation::from_options(HttpMethod::Post, "/subscribe", options, None);

        let names: Vec<&str> = op
            .get_models()
            .iter()
            .map(|m| m.core_schema().name())
            .collect();
        assert_eq!(names, ["Pet", "Event"]);

        let schema = render(&op);
        let callback_op = &schema["callbacks"]["onEvent"]["{$request.body#/callbackUrl}"]["post"];
        assert_eq!(
            callback_op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Event"
        );
    }

    #[test]
    fn test_get_models_keeps_duplicates() {
        let options = RouteOptions::new().body::<Pet>().returns::<Pet>(200);
        let op = Operation::from_options(HttpMethod::Put, "/pets/<int:id>", options, None);
        assert_eq!(op.get_models().len(), 2);
    }

    #[test]
    fn test_auth_schemes_include_callbacks() {
        let hook = Callback::new("hook").route(
            HttpMethod::Post,
            "{$request.body#/url}",
            RouteOptions::new().auth_scheme(BearerAuth::new().named("HookAuth")),
        );
        let options = RouteOptions::new().callback(hook);
        let op = Operation::from_options(HttpMethod::Post, "/hooks", options, None);

        let names: Vec<String> = op
            .auth_schemes()
            .iter()
            .flat_map(|auth| auth.schema().into_keys())
            .collect();
        assert_eq!(names, vec!["HookAuth".to_string()]);
    }

    #[test]
    fn test_prefix_keeps_route_id() {
        let op = Operation::from_options(HttpMethod::Get, "/items", RouteOptions::new(), None);
        let prefixed = op.with_prefix("/v1");

        assert_eq!(prefixed.path(), "/v1/items");
        assert_eq!(prefixed.route_id(), op.route_id());
        assert_eq!(op.path(), "/items");
    }

    #[test]
    fn test_metadata_passthrough() {
        let options = RouteOptions::new()
            .summary("Get pet")
            .description("Returns one pet")
            .operation_id("getPet")
            .tag("pets")
            .deprecated();
        let op = Operation::from_options(HttpMethod::Get, "/pets", options, None);
        let schema = render(&op);

        assert_eq!(schema["summary"], "Get pet");
        assert_eq!(schema["description"], "Returns one pet");
        assert_eq!(schema["operationId"], "getPet");
        assert_eq!(schema["tags"], json!(["pets"]));
        assert_eq!(schema["deprecated"], true);
    }
}
