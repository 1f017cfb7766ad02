//! Pluggable authentication schemes.
//!
//! An [`AuthScheme`] contributes entries to `components.securitySchemes` and
//! a security requirement to every operation it protects. The requirement
//! names are the keys of [`AuthScheme::schema`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::openapi::{SecurityRequirement, SecurityScheme};

/// Something that can describe how an operation is authenticated.
pub trait AuthScheme: Send + Sync + fmt::Debug {
    /// Scheme name → security scheme object.
    fn schema(&self) -> IndexMap<String, SecurityScheme>;

    /// The operation-level requirement: one entry per scheme, no scopes.
    fn requirements(&self) -> Vec<SecurityRequirement> {
        self.schema()
            .into_keys()
            .map(|name| {
                let mut requirement = SecurityRequirement::new();
                requirement.insert(name, Vec::new());
                requirement
            })
            .collect()
    }
}

/// Per-route auth argument.
#[derive(Debug, Clone, Default)]
pub enum AuthSetting {
    /// Inherit the router's default.
    #[default]
    NotSet,
    /// No authentication, even if the router has a default.
    Disabled,
    /// Use this scheme.
    Scheme(Arc<dyn AuthScheme>),
}

impl AuthSetting {
    /// Wraps a concrete scheme.
    pub fn scheme(scheme: impl AuthScheme + 'static) -> Self {
        Self::Scheme(Arc::new(scheme))
    }

    /// Resolves the setting against a router default.
    #[must_use]
    pub fn resolve(&self, default: Option<&Arc<dyn AuthScheme>>) -> Option<Arc<dyn AuthScheme>> {
        match self {
            Self::NotSet => default.cloned(),
            Self::Disabled => None,
            Self::Scheme(scheme) => Some(Arc::clone(scheme)),
        }
    }
}

fn single(name: &str, scheme: SecurityScheme) -> IndexMap<String, SecurityScheme> {
    let mut map = IndexMap::new();
    map.insert(name.to_string(), scheme);
    map
}

/// HTTP bearer token authentication.
///
/// ```rust
/// use scribe_core::{AuthScheme, BearerAuth};
///
/// let auth = BearerAuth::new().with_format("JWT");
/// let schemes = auth.schema();
/// assert_eq!(schemes["BearerAuth"].scheme.as_deref(), Some("bearer"));
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuth {
    name: String,
    bearer_format: Option<String>,
    description: Option<String>,
}

impl Default for BearerAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl BearerAuth {
    /// Bearer auth registered as `BearerAuth`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "BearerAuth".to_string(),
            bearer_format: None,
            description: None,
        }
    }

    /// Uses a different scheme name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets `bearerFormat`, e.g. `JWT`.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.bearer_format = Some(format.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl AuthScheme for BearerAuth {
    fn schema(&self) -> IndexMap<String, SecurityScheme> {
        single(
            &self.name,
            SecurityScheme {
                scheme_type: "http".to_string(),
                description: self.description.clone(),
                scheme: Some("bearer".to_string()),
                bearer_format: self.bearer_format.clone(),
                location: None,
                name: None,
            },
        )
    }
}

/// HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    name: String,
}

impl Default for BasicAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicAuth {
    /// Basic auth registered as `BasicAuth`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "BasicAuth".to_string(),
        }
    }

    /// Uses a different scheme name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl AuthScheme for BasicAuth {
    fn schema(&self) -> IndexMap<String, SecurityScheme> {
        single(
            &self.name,
            SecurityScheme {
                scheme_type: "http".to_string(),
                description: None,
                scheme: Some("basic".to_string()),
                bearer_format: None,
                location: None,
                name: None,
            },
        )
    }
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    /// Request header.
    Header,
    /// Query string.
    Query,
    /// Cookie.
    Cookie,
}

impl ApiKeyLocation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Query => "query",
            Self::Cookie => "cookie",
        }
    }
}

/// API key authentication.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    name: String,
    key_name: String,
    location: ApiKeyLocation,
}

impl ApiKeyAuth {
    /// Key sent in the `key_name` header.
    #[must_use]
    pub fn header(key_name: impl Into<String>) -> Self {
        Self::new(key_name, ApiKeyLocation::Header)
    }

    /// Key sent in the `key_name` query parameter.
    #[must_use]
    pub fn query(key_name: impl Into<String>) -> Self {
        Self::new(key_name, ApiKeyLocation::Query)
    }

    /// Key sent in the `key_name` cookie.
    #[must_use]
    pub fn cookie(key_name: impl Into<String>) -> Self {
        Self::new(key_name, ApiKeyLocation::Cookie)
    }

    /// Key registered as `ApiKeyAuth`.
    #[must_use]
    pub fn new(key_name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self {
            name: "ApiKeyAuth".to_string(),
            key_name: key_name.into(),
            location,
        }
    }

    /// Uses a different scheme name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl AuthScheme for ApiKeyAuth {
    fn schema(&self) -> IndexMap<String, SecurityScheme> {
        single(
            &self.name,
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                description: None,
                scheme: None,
                bearer_format: None,
                location: Some(self.location.as_str().to_string()),
                name: Some(self.key_name.clone()),
            },
        )
    }
}
