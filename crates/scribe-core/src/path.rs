//! Native path → OpenAPI path template translation.
//!
//! Routes are registered with typed placeholders (`/users/<int:id>`); the
//! OpenAPI document wants `{id}`. Translation is total: any segment that is
//! not a well-formed placeholder with a known converter is copied through
//! as-is.

use scribe_router::{Converter, Placeholder};
use serde_json::{json, Value};

/// A path parameter found while translating a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// Parameter name.
    pub name: String,
    /// Declared converter.
    pub converter: Converter,
}

impl PathParam {
    /// JSON Schema for the parameter's declared type.
    #[must_use]
    pub fn schema(&self) -> Value {
        converter_schema(self.converter)
    }
}

/// The result of translating a native route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// OpenAPI path template (`/users/{id}`).
    pub template: String,
    /// Placeholders in order of appearance.
    pub params: Vec<PathParam>,
}

/// JSON Schema for a converter.
#[must_use]
pub fn converter_schema(converter: Converter) -> Value {
    match converter {
        Converter::Int => json!({"type": "integer"}),
        Converter::Float => json!({"type": "number"}),
        Converter::Uuid => json!({"type": "string", "format": "uuid"}),
        Converter::String | Converter::Path => json!({"type": "string"}),
    }
}

/// Translates a native route path into an OpenAPI path template.
///
/// Only a placeholder that makes up a whole `/`-delimited segment is
/// rewritten, the same rule the dispatcher matches by. Text such as
/// `<name>.json` stays literal in both.
///
/// # Example
///
/// ```rust
/// use scribe_core::path::translate;
///
/// let t = translate("/users/<int:id>/posts/<slug>");
/// assert_eq!(t.template, "/users/{id}/posts/{slug}");
/// assert_eq!(t.params.len(), 2);
///
/// // Unknown converters pass through untouched.
/// assert_eq!(translate("/x/<color:c>").template, "/x/<color:c>");
/// ```
#[must_use]
pub fn translate(path: &str) -> PathTemplate {
    let mut params = Vec::new();
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| match Placeholder::parse(segment) {
            Some(placeholder) => {
                let rendered = format!("{{{}}}", placeholder.name);
                params.push(PathParam {
                    name: placeholder.name,
                    converter: placeholder.converter,
                });
                rendered
            }
            None => segment.to_string(),
        })
        .collect();

    PathTemplate {
        template: segments.join("/"),
        params,
    }
}
