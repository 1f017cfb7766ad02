//! Typed parameter and body descriptors.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use schemars::{JsonSchema, Schema, SchemaGenerator};

use crate::openapi::ParameterIn;

/// Where a field is bound in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMode {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Request or response body.
    Body,
}

impl FieldMode {
    /// The OpenAPI parameter location, or `None` for bodies.
    #[must_use]
    pub fn parameter_in(self) -> Option<ParameterIn> {
        match self {
            Self::Path => Some(ParameterIn::Path),
            Self::Query => Some(ParameterIn::Query),
            Self::Header => Some(ParameterIn::Header),
            Self::Cookie => Some(ParameterIn::Cookie),
            Self::Body => None,
        }
    }
}

/// The type-library view of a field's type.
///
/// Holds the type's stable identity and the hook that asks `schemars` for
/// its schema. The hook only runs inside a generator, so definitions for
/// nested types land in the same batch.
#[derive(Clone)]
pub struct CoreSchema {
    schema_id: Cow<'static, str>,
    name: Cow<'static, str>,
    generate: fn(&mut SchemaGenerator) -> Schema,
}

fn subschema<T: JsonSchema>(generator: &mut SchemaGenerator) -> Schema {
    generator.subschema_for::<T>()
}

impl CoreSchema {
    /// Describes `T`.
    #[must_use]
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            schema_id: T::schema_id(),
            name: T::schema_name(),
            generate: subschema::<T>,
        }
    }

    /// Builds a descriptor from parts, for adapters that do not use schemars
    /// derive output directly.
    #[must_use]
    pub fn from_parts(
        schema_id: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        generate: fn(&mut SchemaGenerator) -> Schema,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            name: name.into(),
            generate,
        }
    }

    /// Globally unique identity of the type.
    #[must_use]
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Human-readable type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produces the type's schema inside `generator`, registering any
    /// definitions it needs.
    pub fn generate(&self, generator: &mut SchemaGenerator) -> Schema {
        (self.generate)(generator)
    }
}

impl fmt::Debug for CoreSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreSchema")
            .field("schema_id", &self.schema_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Key of the adapter's field mapping: type identity plus binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    /// The type's schema id.
    pub schema_id: String,
    /// Where the field is bound.
    pub mode: FieldMode,
}

/// One typed parameter or body.
///
/// The [`CoreSchema`] is resolved on first use, not at construction, so
/// fields can be declared before the type library is ready to describe their
/// types. Once resolved it never changes.
///
/// # Example
///
/// ```rust
/// use scribe_core::{FieldMode, ModelField};
///
/// let limit = ModelField::query::<u32>("limit").optional();
/// assert_eq!(limit.mode(), FieldMode::Query);
/// assert!(!limit.is_required());
/// ```
#[derive(Clone)]
pub struct ModelField {
    name: String,
    mode: FieldMode,
    required: bool,
    description: Option<String>,
    resolve: fn() -> CoreSchema,
    core_schema: OnceLock<CoreSchema>,
}

impl ModelField {
    /// A field of type `T` bound at `mode`.
    #[must_use]
    pub fn new<T: JsonSchema>(name: impl Into<String>, mode: FieldMode) -> Self {
        Self {
            name: name.into(),
            mode,
            required: true,
            description: None,
            resolve: CoreSchema::of::<T>,
            core_schema: OnceLock::new(),
        }
    }

    /// A path parameter.
    #[must_use]
    pub fn path<T: JsonSchema>(name: impl Into<String>) -> Self {
        Self::new::<T>(name, FieldMode::Path)
    }

    /// A query parameter.
    #[must_use]
    pub fn query<T: JsonSchema>(name: impl Into<String>) -> Self {
        Self::new::<T>(name, FieldMode::Query)
    }

    /// A header parameter.
    #[must_use]
    pub fn header<T: JsonSchema>(name: impl Into<String>) -> Self {
        Self::new::<T>(name, FieldMode::Header)
    }

    /// A cookie parameter.
    #[must_use]
    pub fn cookie<T: JsonSchema>(name: impl Into<String>) -> Self {
        Self::new::<T>(name, FieldMode::Cookie)
    }

    /// A JSON body (request body or response payload).
    #[must_use]
    pub fn body<T: JsonSchema>() -> Self {
        Self::new::<T>("body", FieldMode::Body)
    }

    /// Marks the field as not required. Path parameters stay required.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = self.mode == FieldMode::Path;
        self
    }

    /// Attaches a description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the field is bound.
    #[must_use]
    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    /// Whether the field must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The resolved core schema, computing it on first access.
    pub fn core_schema(&self) -> &CoreSchema {
        self.core_schema.get_or_init(self.resolve)
    }

    /// The field's key in an adapter field mapping.
    pub fn key(&self) -> FieldKey {
        FieldKey {
            schema_id: self.core_schema().schema_id().to_string(),
            mode: self.mode,
        }
    }

    /// The `(field, mode, core schema)` triple consumed by a
    /// [`TypeSchemaAdapter`](crate::TypeSchemaAdapter).
    pub fn schema_entry(&self) -> (&Self, FieldMode, &CoreSchema) {
        (self, self.mode, self.core_schema())
    }
}

impl fmt::Debug for ModelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelField")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("required", &self.required)
            .field("core_schema", &self.core_schema.get())
            .finish_non_exhaustive()
    }
}
