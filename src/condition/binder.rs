//! Argument binding.
//!
//! Builds the argument list for a located predicate: the instance in the
//! first slot, then the declaration's extra parameters in order.

use tracing::{trace, warn};

use super::locator::MethodCandidate;
use crate::reflect::{coerce, Introspect, TypeRef, Value};

/// Build the argument list for `candidate`.
///
/// The first slot gets the instance as-is when the parameter accepts it,
/// a converted copy when [`coerce`] can produce one, and the unconverted
/// instance otherwise. Slots the extra parameters cannot fill are left
/// out; the evaluator reports the shortfall when it invokes.
pub fn bind<I: Introspect + ?Sized>(
    introspect: &I,
    candidate: &MethodCandidate,
    instance: Option<&Value>,
    extra_parameters: &[Value],
) -> Vec<Value> {
    let params = candidate.parameter_types();
    let Some(first) = params.first() else {
        if !extra_parameters.is_empty() {
            trace!(
                "Condition method '{}' takes no parameters; ignoring {} declared parameter(s)",
                candidate.name(),
                extra_parameters.len()
            );
        }
        return Vec::new();
    };

    let instance = instance.cloned().unwrap_or_default();
    let mut args = Vec::with_capacity(params.len());
    args.push(bind_instance(introspect, candidate, first, instance));

    let slots = params.len() - 1;
    args.extend(extra_parameters.iter().take(slots).cloned());

    trace!(
        "Bound {} of {} argument(s) for '{}'",
        args.len(),
        params.len(),
        candidate.name()
    );
    args
}

fn bind_instance<I: Introspect + ?Sized>(
    introspect: &I,
    candidate: &MethodCandidate,
    param: &TypeRef,
    instance: Value,
) -> Value {
    if *param == TypeRef::Object || introspect.is_instance_of(&instance, param) {
        return instance;
    }

    match coerce(&instance, param) {
        Some(converted) => converted,
        None => {
            warn!(
                "Cannot convert {} to '{}' for condition method '{}'; passing it unconverted",
                instance.describe(),
                param,
                candidate.name()
            );
            instance
        }
    }
}
