//! Whole-object validation.
//!
//! A [`Validator`] applies every conditional requirement declared for an
//! instance's type, and for each of its supertypes, and collects the
//! failures. A failing field never stops its siblings from being checked;
//! a broken declaration does stop validation of the instance.

use std::collections::BTreeMap;

use tracing::debug;

use crate::condition::{ConditionSpec, Failure, Outcome, ValidationContext};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::reflect::{Introspect, TypeRef, Value};

static NULL: Value = Value::Null;

/// A declared rule with its condition already built.
#[derive(Debug, Clone)]
struct CompiledRule {
    declared_on: TypeRef,
    field: String,
    display_name: String,
    spec: ConditionSpec,
}

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    /// Type the rule was declared on
    pub declared_on: TypeRef,
    /// Field name
    pub field: String,
    /// What was wrong
    pub failure: Failure,
}

/// Result of validating one instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    checked: usize,
    failures: Vec<FieldFailure>,
}

impl ValidationReport {
    /// Whether every checked field passed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of fields that were checked.
    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Failure messages in field order.
    pub fn messages(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|f| f.failure.reason.as_str())
            .collect()
    }

    /// The failure for a field, if it failed.
    pub fn failure_for(&self, field: &str) -> Option<&Failure> {
        self.failures
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.failure)
    }
}

/// Validates instances against a set of declarations.
pub struct Validator<'a, I: Introspect + ?Sized> {
    introspect: &'a I,
    rules: Vec<CompiledRule>,
}

impl<'a, I: Introspect + ?Sized> Validator<'a, I> {
    /// Build every declared condition once, up front.
    pub fn new(introspect: &'a I, config: &ValidationConfig) -> Self {
        let rules = config
            .types
            .iter()
            .flat_map(|(type_name, type_rules)| {
                type_rules.fields.iter().map(move |(field, rule)| CompiledRule {
                    declared_on: TypeRef::named(type_name),
                    field: field.clone(),
                    display_name: rule.display_name_or(field).to_string(),
                    spec: rule.to_spec(),
                })
            })
            .collect();

        Self { introspect, rules }
    }

    /// Number of compiled rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules that apply to an instance of `ty`, one per field.
    ///
    /// When a field has rules on several types in the hierarchy, the one on
    /// the most derived type wins.
    fn applicable(&self, ty: &TypeRef) -> Vec<&CompiledRule> {
        let mut by_field: BTreeMap<&str, &CompiledRule> = BTreeMap::new();

        for rule in self
            .rules
            .iter()
            .filter(|r| self.introspect.is_subtype(ty, &r.declared_on))
        {
            match by_field.get(rule.field.as_str()) {
                Some(existing)
                    if self
                        .introspect
                        .is_subtype(&existing.declared_on, &rule.declared_on) => {}
                _ => {
                    by_field.insert(&rule.field, rule);
                }
            }
        }

        by_field.into_values().collect()
    }

    /// Validate every declared field of `instance`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration or invocation error met; field
    /// failures are reported in the [`ValidationReport`] instead.
    pub fn validate(&self, instance: &Value) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();
        let Some(ty) = self.introspect.type_of(instance) else {
            return Ok(report);
        };
        let object = instance.as_object();

        for rule in self.applicable(&ty) {
            let value = object
                .and_then(|o| o.get(&rule.field))
                .unwrap_or(&NULL);
            let ctx = ValidationContext::new(instance, value, &rule.display_name);

            report.checked += 1;
            if let Outcome::Failure(failure) = rule.spec.is_required(self.introspect, &ctx)? {
                report.failures.push(FieldFailure {
                    declared_on: rule.declared_on.clone(),
                    field: rule.field.clone(),
                    failure,
                });
            }
        }

        debug!(
            "Validated '{}': {} field(s) checked, {} failure(s)",
            ty,
            report.checked,
            report.failures.len()
        );
        Ok(report)
    }
}
