//! Declaration loading, parsing, and checking.
//!
//! Conditional requirements can be declared in code with
//! [`crate::condition::ConditionSpec`] or in a YAML file:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Up-front declaration checks in [`validator`]
//!
//! # Example
//!
//! ```
//! use requisite::config::{load_config_file, validate};
//! use requisite::reflect::{MethodDef, TypeDef, TypeRegistry, Value};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("rules.yml");
//! fs::write(
//!     &path,
//!     "types:\n  Person:\n    fields:\n      name:\n        required_if:\n          method: IsSurnameEmpty\n",
//! )
//! .unwrap();
//!
//! let registry = TypeRegistry::new().with_type(
//!     TypeDef::new("Person").method(MethodDef::instance("IsSurnameEmpty", |_, _| Ok(Value::Bool(true)))),
//! );
//!
//! let config = load_config_file(&path).unwrap();
//! validate(&config, &registry).unwrap();
//! assert_eq!(config.rule_count(), 1);
//! ```
//!
//! # Declaration format
//!
//! ```yaml
//! types:
//!   Person:
//!     fields:
//!       name:
//!         display_name: Name
//!         required_if:
//!           method: IsSurnameEmpty
//!           declaring_type: PersonRules   # optional
//!           parameters: [18]              # optional
//!           allow_blank: false            # optional
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{config_schema, ConditionConfig, FieldRule, TypeRules, ValidationConfig};

// Loader re-exports
pub use loader::{load_config_file, load_config_files, parse_config};

// Validator re-exports
pub use validator::{validate, validate_config, ConfigIssue};
