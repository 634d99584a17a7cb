//! The introspection contract.
//!
//! Predicate resolution needs exactly four primitives from its host: find
//! methods by name, get a value's runtime type, test the subtype relation,
//! and invoke a method. Anything that can answer these can drive the
//! condition pipeline; [`super::TypeRegistry`] is the in-crate answer.

use std::sync::Arc;

use super::method::MethodDef;
use super::types::TypeRef;
use super::value::Value;

/// Type and method introspection used by predicate resolution.
pub trait Introspect {
    /// All methods named `name` visible on `scope`, most derived first.
    fn methods_named(&self, scope: &TypeRef, name: &str) -> Vec<Arc<MethodDef>>;

    /// Runtime type of a value; `None` for null.
    fn type_of(&self, value: &Value) -> Option<TypeRef>;

    /// Whether `sub` can be used where `sup` is expected.
    fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool;

    /// Run a method with an already bound argument list.
    fn invoke(
        &self,
        method: &MethodDef,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> anyhow::Result<Value>;

    /// Whether `value` is non-null and its runtime type is a subtype of `ty`.
    fn is_instance_of(&self, value: &Value, ty: &TypeRef) -> bool {
        self.type_of(value)
            .is_some_and(|actual| self.is_subtype(&actual, ty))
    }
}
