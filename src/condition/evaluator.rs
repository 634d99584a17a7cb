//! Predicate invocation.

use tracing::debug;

use super::locator::MethodCandidate;
use crate::error::{RequisiteError, Result};
use crate::reflect::{Introspect, TypeRef, Value};

/// Invoke a bound predicate and read its boolean answer.
///
/// Signature problems are checked before anything runs: the declared
/// return type must be `bool`, the argument list must fill every
/// parameter, and an instance method needs a receiver of the scope type.
/// An error from the predicate itself is returned as `InvocationFailed`
/// with the original error as its source; the field is attached by the
/// caller.
pub fn evaluate<I: Introspect + ?Sized>(
    introspect: &I,
    candidate: &MethodCandidate,
    receiver: Option<&Value>,
    args: &[Value],
) -> Result<bool> {
    let method = candidate.method();

    if *method.return_type() != TypeRef::Bool {
        return Err(RequisiteError::InvalidReturnType {
            method: method.name().to_string(),
            scope: candidate.scope().clone(),
            found: method.return_type().to_string(),
        });
    }

    if args.len() != method.arity() {
        return Err(RequisiteError::ArgumentCountMismatch {
            method: method.name().to_string(),
            expected: method.arity(),
            supplied: args.len(),
        });
    }

    let receiver = if method.is_static() {
        None
    } else {
        match receiver {
            Some(this) if introspect.is_instance_of(this, candidate.scope()) => Some(this),
            other => {
                return Err(RequisiteError::ReceiverMismatch {
                    method: method.name().to_string(),
                    scope: candidate.scope().clone(),
                    found: other.map_or_else(|| "null".to_string(), Value::describe),
                })
            }
        }
    };

    let result = introspect
        .invoke(method, receiver, args)
        .map_err(|source| RequisiteError::InvocationFailed {
            method: method.name().to_string(),
            scope: candidate.scope().clone(),
            field: None,
            source,
        })?;

    match result {
        Value::Bool(met) => {
            debug!("Condition '{}' evaluated to {}", method.name(), met);
            Ok(met)
        }
        other => Err(RequisiteError::InvalidReturnType {
            method: method.name().to_string(),
            scope: candidate.scope().clone(),
            found: other.describe(),
        }),
    }
}
