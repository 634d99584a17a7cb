//! Type and method introspection.
//!
//! Rust has no runtime reflection, so predicate lookup runs against an
//! explicit registry the host fills in once at startup:
//!
//! - [`TypeRef`] - Identity of a type (built-in or registered by name)
//! - [`Value`] / [`Object`] - The dynamically typed object graph
//! - [`MethodDef`] - A named, typed, callable method
//! - [`TypeRegistry`] - Types with parents and methods, implementing [`Introspect`]
//! - [`coerce`] - Best-effort scalar conversion used by argument binding
//!
//! # Example
//!
//! ```
//! use requisite::reflect::{Introspect, MethodDef, Object, TypeDef, TypeRef, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new().with_type(
//!     TypeDef::new("Person").method(MethodDef::instance("IsAnonymous", |this, _| {
//!         let person = this.and_then(Value::as_object);
//!         Ok(Value::Bool(person.and_then(|p| p.get_str("name")).is_none()))
//!     })),
//! );
//!
//! let methods = registry.methods_named(&TypeRef::named("Person"), "IsAnonymous");
//! let person = Value::from(Object::new("Person"));
//! let result = registry.invoke(&methods[0], Some(&person), &[]).unwrap();
//! assert_eq!(result, Value::Bool(true));
//! ```

pub mod coerce;
pub mod introspect;
pub mod method;
pub mod registry;
pub mod types;
pub mod value;

pub use coerce::coerce;
pub use introspect::Introspect;
pub use method::{Dispatch, MethodBody, MethodDef, Visibility};
pub use registry::{TypeDef, TypeRegistry};
pub use types::TypeRef;
pub use value::{Object, Value, TYPE_KEY};
