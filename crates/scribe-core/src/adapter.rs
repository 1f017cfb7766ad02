//! Batched schema generation for every model an API references.
//!
//! All fields are resolved in one call so the adapter can name each type
//! once and hand out the same reference wherever the type is used.

use indexmap::IndexMap;
use schemars::generate::SchemaSettings;
use serde_json::Value;

use crate::error::CoreResult;
use crate::field::{CoreSchema, FieldKey, FieldMode, ModelField};

/// Template for component references; `{model}` is replaced by the type name.
pub const DEFAULT_REF_TEMPLATE: &str = "#/components/schemas/{model}";

/// Reference prefixes schemars may emit for its own definitions.
const SCHEMARS_REF_PREFIXES: [&str; 2] = ["#/$defs/", "#/definitions/"];

/// One entry of a batch: the field, its binding and its core schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInput<'a> {
    /// The field being described.
    pub field: &'a ModelField,
    /// Where the field is bound.
    pub mode: FieldMode,
    /// The field's resolved core schema.
    pub core_schema: &'a CoreSchema,
}

impl<'a> SchemaInput<'a> {
    /// Builds the input for `field`, resolving its core schema.
    pub fn from_field(field: &'a ModelField) -> Self {
        let (field, mode, core_schema) = field.schema_entry();
        Self {
            field,
            mode,
            core_schema,
        }
    }

    /// The mapping key this input resolves to.
    pub fn key(&self) -> FieldKey {
        FieldKey {
            schema_id: self.core_schema.schema_id().to_string(),
            mode: self.mode,
        }
    }
}

/// Output of a batch: per-field schemas plus shared component definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedDefinitions {
    /// Schema to use wherever a field appears: a `$ref` or an inline schema.
    pub field_mapping: IndexMap<FieldKey, Value>,
    /// Component schemas, keyed by component name.
    pub definitions: IndexMap<String, Value>,
}

/// Capability that turns a batch of fields into schemas.
///
/// Implementations must be deterministic: the same inputs in the same order
/// produce the same output.
pub trait TypeSchemaAdapter: Send + Sync {
    /// Resolves every input in one pass.
    ///
    /// A field the adapter cannot describe should be left out of
    /// `field_mapping` rather than failing the batch.
    fn generate_definitions(&self, inputs: &[SchemaInput<'_>]) -> CoreResult<GeneratedDefinitions>;
}

/// [`TypeSchemaAdapter`] backed by a single `schemars` generator.
///
/// ```rust
/// use schemars::JsonSchema;
/// use scribe_core::{ModelField, SchemaInput, SchemarsAdapter, TypeSchemaAdapter};
///
/// #[derive(JsonSchema)]
/// struct Pet { name: String }
///
/// let a = ModelField::body::<Pet>();
/// let b = ModelField::body::<Pet>();
/// let inputs = [SchemaInput::from_field(&a), SchemaInput::from_field(&b)];
///
/// let generated = SchemarsAdapter::new().generate_definitions(&inputs).unwrap();
/// assert_eq!(generated.definitions.len(), 1);
/// assert_eq!(
///     generated.field_mapping[&a.key()]["$ref"],
///     "#/components/schemas/Pet"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SchemarsAdapter {
    ref_template: String,
}

impl Default for SchemarsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemarsAdapter {
    /// Adapter emitting `#/components/schemas/{model}` references.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ref_template(DEFAULT_REF_TEMPLATE)
    }

    /// Adapter with a custom reference template containing `{model}`.
    #[must_use]
    pub fn with_ref_template(ref_template: impl Into<String>) -> Self {
        Self {
            ref_template: ref_template.into(),
        }
    }

    fn reference(&self, model: &str) -> String {
        self.ref_template.replace("{model}", model)
    }

    fn rewrite_refs(&self, value: &mut Value) {
        match value {
            Value::Object(obj) => {
                if let Some(Value::String(target)) = obj.get_mut("$ref") {
                    if let Some(model) = SCHEMARS_REF_PREFIXES
                        .iter()
                        .find_map(|prefix| target.strip_prefix(prefix))
                    {
                        *target = self.reference(model);
                    }
                }
                for v in obj.values_mut() {
                    self.rewrite_refs(v);
                }
            }
            Value::Array(items) => {
                for v in items {
                    self.rewrite_refs(v);
                }
            }
            _ => {}
        }
    }
}

impl TypeSchemaAdapter for SchemarsAdapter {
    fn generate_definitions(&self, inputs: &[SchemaInput<'_>]) -> CoreResult<GeneratedDefinitions> {
        let mut generator = SchemaSettings::draft2020_12().into_generator();
        let mut field_mapping = IndexMap::new();

        for input in inputs {
            let key = input.key();
            if field_mapping.contains_key(&key) {
                continue;
            }
            let schema = input.core_schema.generate(&mut generator);
            match serde_json::to_value(&schema) {
                Ok(mut value) => {
                    self.rewrite_refs(&mut value);
                    field_mapping.insert(key, value);
                }
                Err(err) => {
                    tracing::warn!(
                        field = input.field.name(),
                        r#type = input.core_schema.name(),
                        error = %err,
                        "schema could not be converted, field will be omitted"
                    );
                }
            }
        }

        let definitions = generator
            .definitions()
            .iter()
            .map(|(name, schema)| {
                let mut schema = schema.clone();
                self.rewrite_refs(&mut schema);
                (name.clone(), schema)
            })
            .collect();

        Ok(GeneratedDefinitions {
            field_mapping,
            definitions,
        })
    }
}
