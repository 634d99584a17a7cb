//! Declaration file schema.
//!
//! These structs map to the YAML file that attaches conditional
//! requirements to fields of registered types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::condition::ConditionSpec;
use crate::reflect::{TypeRef, Value};

/// Root of a declaration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Field rules keyed by type name
    pub types: BTreeMap<String, TypeRules>,
}

/// Rules declared on one type. Subtypes inherit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TypeRules {
    /// Field rules keyed by field name
    pub fields: BTreeMap<String, FieldRule>,
}

/// A conditionally required field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FieldRule {
    /// Name used in failure messages (defaults to the field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// The condition under which the field is required
    pub required_if: ConditionConfig,
}

/// Serialized form of a [`ConditionSpec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConditionConfig {
    /// Name of the boolean predicate method
    pub method: String,

    /// Type to look the predicate up on (defaults to the instance's type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,

    /// Extra arguments passed after the instance, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<serde_json::Value>,

    /// Whether empty or whitespace-only strings count as present
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_blank: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl ValidationConfig {
    /// Add a field rule, builder style.
    pub fn with_rule(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        rule: FieldRule,
    ) -> Self {
        self.types
            .entry(type_name.into())
            .or_default()
            .fields
            .insert(field.into(), rule);
        self
    }

    /// Rules declared directly on `ty` (not inherited ones).
    pub fn rules_for(&self, ty: &TypeRef) -> Option<&TypeRules> {
        self.types.get(ty.name())
    }

    /// Total number of field rules across all types.
    pub fn rule_count(&self) -> usize {
        self.types.values().map(|t| t.fields.len()).sum()
    }
}

impl FieldRule {
    pub fn new(required_if: ConditionConfig) -> Self {
        Self {
            display_name: None,
            required_if,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The display name, falling back to the field name.
    pub fn display_name_or<'a>(&'a self, field: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(field)
    }

    /// Build the immutable declaration this rule describes.
    pub fn to_spec(&self) -> ConditionSpec {
        self.required_if.to_spec()
    }
}

impl ConditionConfig {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn to_spec(&self) -> ConditionSpec {
        let spec = ConditionSpec::new(self.method.clone())
            .with_parameters(self.parameters.iter().cloned().map(Value::from))
            .with_allow_blank(self.allow_blank);
        match &self.declaring_type {
            Some(ty) => spec.with_declaring_type(TypeRef::named(ty)),
            None => spec,
        }
    }
}

/// JSON Schema (Draft 2020-12) for declaration files.
pub fn config_schema() -> serde_json::Value {
    schemars::schema_for!(ValidationConfig).to_value()
}
