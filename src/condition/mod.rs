//! Conditional requirement evaluation.
//!
//! Deciding whether one field is required runs four steps in order:
//!
//! - [`locator`] - Find the predicate method by name and rank overloads
//! - [`binder`] - Build its argument list from the instance and extra parameters
//! - [`evaluator`] - Invoke it and insist on a boolean answer
//! - [`checker`] - Turn the answer and the field value into an [`Outcome`]
//!
//! [`ConditionSpec`] holds the declaration and composes the steps.
//!
//! # Example
//!
//! ```
//! use requisite::condition::{is_required, ConditionSpec, Outcome};
//! use requisite::reflect::{MethodDef, Object, TypeDef, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new().with_type(TypeDef::new("Person").method(
//!     MethodDef::instance("IsSurnameEmpty", |this, _| {
//!         let surname = this
//!             .and_then(Value::as_object)
//!             .and_then(|p| p.get_str("surname"))
//!             .unwrap_or("");
//!         Ok(Value::Bool(surname.trim().is_empty()))
//!     }),
//! ));
//!
//! let spec = ConditionSpec::new("IsSurnameEmpty");
//! let person = Value::from(Object::new("Person").with("surname", ""));
//!
//! let outcome = is_required(&registry, &person, &Value::Null, "Name", &spec).unwrap();
//! assert_eq!(outcome.reason(), Some("Name is required"));
//! ```

pub mod binder;
pub mod checker;
pub mod evaluator;
pub mod locator;
pub mod spec;

pub use binder::bind;
pub use checker::{check, Failure, FailureKind, Outcome};
pub use evaluator::evaluate;
pub use locator::{locate, rank, select, MatchRank, MethodCandidate};
pub use spec::{is_required, ConditionSpec, ValidationContext};
