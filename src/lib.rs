//! Requisite - conditionally required field validation.
//!
//! Requisite decides whether a field must be filled in by asking a boolean
//! predicate on the object being validated (or on a helper type). The
//! predicate is found by name, the best overload is picked by a fixed
//! priority order, and the field's value is then checked for presence.
//!
//! # Modules
//!
//! - [`condition`] - Predicate lookup, argument binding, evaluation, and the field check
//! - [`config`] - Declaration loading, parsing, and up-front checks
//! - [`error`] - Error types and result aliases
//! - [`reflect`] - Types, values, methods, and the type registry
//! - [`validator`] - Validation of every declared field of an instance
//!
//! # Example
//!
//! ```
//! use requisite::config::{ConditionConfig, FieldRule, ValidationConfig};
//! use requisite::reflect::{MethodDef, Object, TypeDef, TypeRegistry, Value};
//! use requisite::validator::Validator;
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
//! let config = ValidationConfig::default().with_rule(
//!     "Person",
//!     "name",
//!     FieldRule::new(ConditionConfig::new("IsSurnameEmpty")).with_display_name("Name"),
//! );
//!
//! let validator = Validator::new(&registry, &config);
//! let report = validator
//!     .validate(&Value::from(Object::new("Person").with("surname", "")))
//!     .unwrap();
//! assert_eq!(report.messages(), vec!["Name is required"]);
//! ```

pub mod condition;
pub mod config;
pub mod error;
pub mod reflect;
pub mod validator;

pub use error::{RequisiteError, Result};
