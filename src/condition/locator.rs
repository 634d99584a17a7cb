//! Predicate lookup.
//!
//! Given a scope, a method name, and the number of extra parameters a
//! declaration supplies, pick the one method to call. Every candidate gets a
//! [`MatchRank`]; the lowest rank wins and ties go to declaration order
//! (most derived type first).
//!
//! The ranking is a pure function of the candidate's signature so it can
//! be tested without a registry behind it beyond the subtype relation.

use std::sync::Arc;

use tracing::debug;

use crate::error::{RequisiteError, Result};
use crate::reflect::{Introspect, MethodDef, TypeRef, Value};

/// Why a candidate matched, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchRank {
    /// Takes no parameters at all. Declared extra parameters are not passed.
    Parameterless,
    /// First parameter is exactly the scope type.
    ExactScope,
    /// First parameter is a declared ancestor of the scope type.
    ScopeSupertype,
    /// First parameter is an ancestor of the instance's runtime type.
    InstanceSupertype,
    /// First parameter is the universal `object` type.
    AnyObject,
    /// Arity matches but the first parameter is unrelated; binding coerces.
    Fallback,
}

/// The method chosen for a condition, with the context it was chosen in.
#[derive(Debug, Clone)]
pub struct MethodCandidate {
    method: Arc<MethodDef>,
    scope: TypeRef,
    rank: MatchRank,
}

impl MethodCandidate {
    pub fn method(&self) -> &MethodDef {
        &self.method
    }

    pub fn name(&self) -> &str {
        self.method.name()
    }

    pub fn parameter_types(&self) -> &[TypeRef] {
        self.method.parameter_types()
    }

    pub fn is_static(&self) -> bool {
        self.method.is_static()
    }

    pub fn return_type(&self) -> &TypeRef {
        self.method.return_type()
    }

    /// The type the method was looked up on.
    pub fn scope(&self) -> &TypeRef {
        &self.scope
    }

    pub fn rank(&self) -> MatchRank {
        self.rank
    }
}

/// Rank one method, or `None` if it cannot be called with `extra_arity`
/// extra parameters.
///
/// `object` never counts as an ancestor for the two supertype ranks; an
/// `object`-typed overload ranks as [`MatchRank::AnyObject`].
pub fn rank<I: Introspect + ?Sized>(
    introspect: &I,
    method: &MethodDef,
    scope: &TypeRef,
    instance_type: Option<&TypeRef>,
    extra_arity: usize,
) -> Option<MatchRank> {
    let params = method.parameter_types();
    let Some(first) = params.first() else {
        return Some(MatchRank::Parameterless);
    };
    if params.len() != extra_arity + 1 {
        return None;
    }

    let is_object = *first == TypeRef::Object;
    let rank = if first == scope {
        MatchRank::ExactScope
    } else if !is_object && introspect.is_subtype(scope, first) {
        MatchRank::ScopeSupertype
    } else if !is_object && instance_type.is_some_and(|ty| introspect.is_subtype(ty, first)) {
        MatchRank::InstanceSupertype
    } else if is_object {
        MatchRank::AnyObject
    } else {
        MatchRank::Fallback
    };
    Some(rank)
}

/// Pick the best candidate: lowest rank, first declared on ties.
pub fn select<I: Introspect + ?Sized>(
    introspect: &I,
    candidates: &[Arc<MethodDef>],
    scope: &TypeRef,
    instance_type: Option<&TypeRef>,
    extra_arity: usize,
) -> Option<(Arc<MethodDef>, MatchRank)> {
    candidates
        .iter()
        .filter_map(|m| {
            rank(introspect, m, scope, instance_type, extra_arity).map(|r| (Arc::clone(m), r))
        })
        .min_by_key(|(_, r)| *r)
}

/// Find the method `method_name` on `scope` callable with `extra_arity`
/// extra parameters.
///
/// # Errors
///
/// Returns `MethodNotFound` if no method of that name exists, or none of
/// them has a usable arity.
pub fn locate<I: Introspect + ?Sized>(
    introspect: &I,
    scope: &TypeRef,
    method_name: &str,
    instance: Option<&Value>,
    extra_arity: usize,
) -> Result<MethodCandidate> {
    let not_found = || RequisiteError::MethodNotFound {
        method: method_name.to_string(),
        scope: scope.clone(),
    };

    let candidates = introspect.methods_named(scope, method_name);
    if candidates.is_empty() {
        return Err(not_found());
    }

    let instance_type = instance.and_then(|v| introspect.type_of(v));
    let (method, rank) = select(
        introspect,
        &candidates,
        scope,
        instance_type.as_ref(),
        extra_arity,
    )
    .ok_or_else(not_found)?;

    debug!(
        "Resolved condition method {} on '{}' ({:?}, {} candidate(s))",
        method,
        scope,
        rank,
        candidates.len()
    );

    Ok(MethodCandidate {
        method,
        scope: scope.clone(),
        rank,
    })
}
