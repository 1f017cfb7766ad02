//! OpenAPI 3.1 object model.
//!
//! These types mirror the subset of the OpenAPI 3.1 document that scribe
//! produces. Every optional or collection field is skipped when unset or
//! empty, so serialized documents carry no `null`s and no empty containers
//! besides the required `paths` and `components` objects.
//!
//! Schemas are kept as raw JSON values: component definitions come straight
//! from the type-schema adapter and are either `{"$ref": ...}` objects or
//! inline JSON Schema.
//!
//! Reference: <https://spec.openapis.org/oas/v3.1.0>

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::method::HttpMethod;

/// The OpenAPI version every document declares.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// A complete document, as served from the docs route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// Always [`OPENAPI_VERSION`].
    pub openapi: String,
    /// Title, version and description.
    pub info: Info,
    /// Base URLs, in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Named schemas and security schemes referenced from `paths`.
    #[serde(default)]
    pub components: Components,
    /// Path items keyed by OpenAPI path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// The `info` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Shown as the page heading in Swagger UI.
    pub title: String,
    /// Version of the described API, not of OpenAPI.
    pub version: String,
    /// Cleaned-up, multi-line text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One `servers` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Absolute or relative base URL.
    pub url: String,
    /// Free text shown next to the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// A server with only a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// `GET` on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// `PUT` on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// `POST` on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// `DELETE` on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// `PATCH` on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Stores `operation` under `method`, replacing any earlier one.
    pub fn set(&mut self, method: HttpMethod, operation: Operation) {
        *self.slot(method) = Some(operation);
    }

    /// Returns the operation stored under `method`.
    #[must_use]
    pub fn get_operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
        }
    }
}

/// A callback: runtime expression → path item.
pub type Callback = IndexMap<String, PathItem>;

/// Security requirement: scheme name → scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// One method on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Set through `RouteOptions::operation_id`; omitted otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// One-line summary shown in the operation list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer text shown when the operation is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Swagger UI groups operations by their first tag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Omitted from JSON when false.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Path parameters first, then the other declared parameters in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// From the body field, when the route declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, Response>,
    /// Callbacks keyed by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, Callback>,
    /// Empty means the operation is public.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// `?name=value`
    Query,
    /// A `{name}` segment of the path template.
    Path,
    /// A request header.
    Header,
    /// A request cookie.
    Cookie,
}

/// A single entry in an operation's `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name as it appears in the path template, query or header.
    pub name: String,
    /// Serialized as `in`.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// From the field's description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always true for path parameters.
    #[serde(default)]
    pub required: bool,
    /// JSON Schema of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// The `requestBody` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// From the body field's description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// False only for an optional body field.
    #[serde(default)]
    pub required: bool,
    /// Always `application/json`.
    pub content: IndexMap<String, MediaType>,
}

/// Body content for one media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// A `$ref` into components, or an inline schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl MediaType {
    /// `application/json` content holding `schema`.
    #[must_use]
    pub fn json(schema: Value) -> IndexMap<String, Self> {
        let mut content = IndexMap::new();
        content.insert(
            "application/json".to_string(),
            Self {
                schema: Some(schema),
            },
        );
        content
    }
}

/// One entry of an operation's `responses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Required by OpenAPI, so never omitted.
    pub description: String,
    /// Empty for responses without a model.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// The `components` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Type definitions keyed by type name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,
    /// Every scheme named by an operation's `security`, callbacks included.
    /// Schemes sharing a name collapse to the last one seen.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// A `securitySchemes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Security scheme type (`http`, `apiKey`).
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Free text shown in the authorize dialog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `bearer` or `basic` when the type is `http`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// e.g. `JWT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
    /// `header`, `query` or `cookie` when the type is `apiKey`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// Header, query or cookie name carrying the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
