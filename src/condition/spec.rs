//! Conditional requirement declarations.
//!
//! A [`ConditionSpec`] is what gets attached to a field: the name of the
//! predicate deciding whether the field is required, where to look for it,
//! the extra parameters to pass, and whether blank strings count as
//! present. [`ConditionSpec::is_required`] runs the whole pipeline for one
//! field of one instance.

use tracing::debug;

use super::binder::bind;
use super::checker::{check, Outcome};
use super::evaluator::evaluate;
use super::locator::locate;
use crate::error::{RequisiteError, Result};
use crate::reflect::{Introspect, TypeRef, Value};

/// Declaration of a conditionally required field.
///
/// Built once with the `with_*` methods and then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSpec {
    method_name: String,
    declaring_type: Option<TypeRef>,
    extra_parameters: Vec<Value>,
    allow_blank: bool,
}

impl ConditionSpec {
    /// Require the field whenever `method_name` returns true.
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            declaring_type: None,
            extra_parameters: Vec::new(),
            allow_blank: false,
        }
    }

    /// Look the predicate up on `ty` instead of on the instance's type.
    pub fn with_declaring_type(mut self, ty: impl Into<TypeRef>) -> Self {
        self.declaring_type = Some(ty.into());
        self
    }

    /// Append one extra parameter.
    pub fn with_parameter(mut self, value: impl Into<Value>) -> Self {
        self.extra_parameters.push(value.into());
        self
    }

    /// Append several extra parameters in order.
    pub fn with_parameters<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.extra_parameters
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Accept empty and whitespace-only strings as present.
    pub fn with_allow_blank(mut self, allow_blank: bool) -> Self {
        self.allow_blank = allow_blank;
        self
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn declaring_type(&self) -> Option<&TypeRef> {
        self.declaring_type.as_ref()
    }

    pub fn extra_parameters(&self) -> &[Value] {
        &self.extra_parameters
    }

    pub fn allow_blank(&self) -> bool {
        self.allow_blank
    }

    /// The type the predicate is looked up on for this instance.
    ///
    /// # Errors
    ///
    /// Returns `MissingScope` when there is no declaring type and the
    /// instance is absent.
    pub fn resolve_scope<I: Introspect + ?Sized>(
        &self,
        introspect: &I,
        instance: Option<&Value>,
    ) -> Result<TypeRef> {
        if let Some(ty) = &self.declaring_type {
            return Ok(ty.clone());
        }
        instance
            .and_then(|v| introspect.type_of(v))
            .ok_or_else(|| RequisiteError::MissingScope {
                method: self.method_name.clone(),
            })
    }

    /// Decide whether the field in `ctx` passes this declaration.
    ///
    /// # Errors
    ///
    /// Configuration errors (`MethodNotFound`, `InvalidReturnType`, ...)
    /// and `InvocationFailed` from the predicate. A required field that is
    /// missing or blank is an `Ok` [`Outcome::Failure`].
    pub fn is_required<I: Introspect + ?Sized>(
        &self,
        introspect: &I,
        ctx: &ValidationContext<'_>,
    ) -> Result<Outcome> {
        let instance = Some(ctx.instance).filter(|v| !v.is_null());
        let scope = self.resolve_scope(introspect, instance)?;

        let candidate = locate(
            introspect,
            &scope,
            &self.method_name,
            instance,
            self.extra_parameters.len(),
        )?;
        let args = bind(introspect, &candidate, instance, &self.extra_parameters);
        let condition_met = evaluate(introspect, &candidate, instance, &args)
            .map_err(|e| e.for_field(ctx.field_display_name))?;

        let outcome = check(
            condition_met,
            ctx.field_value,
            self.allow_blank,
            ctx.field_display_name,
        );
        debug!(
            "Field '{}' ({} on '{}'): {:?}",
            ctx.field_display_name, self.method_name, scope, outcome
        );
        Ok(outcome)
    }
}

/// The field being validated, borrowed for one call.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub instance: &'a Value,
    pub field_value: &'a Value,
    pub field_display_name: &'a str,
}

impl<'a> ValidationContext<'a> {
    pub fn new(instance: &'a Value, field_value: &'a Value, field_display_name: &'a str) -> Self {
        Self {
            instance,
            field_value,
            field_display_name,
        }
    }
}

/// Decide whether a field is satisfied, given the instance it belongs to.
///
/// Shorthand for building a [`ValidationContext`] and calling
/// [`ConditionSpec::is_required`].
pub fn is_required<I: Introspect + ?Sized>(
    introspect: &I,
    instance: &Value,
    field_value: &Value,
    field_display_name: &str,
    spec: &ConditionSpec,
) -> Result<Outcome> {
    spec.is_required(
        introspect,
        &ValidationContext::new(instance, field_value, field_display_name),
    )
}
