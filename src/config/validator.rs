//! Declaration checks.
//!
//! Validation proper only finds a broken declaration when the affected
//! field is first checked. These checks run the same lookup up front so a
//! bad declaration file can be rejected when it is loaded:
//! - Declared types and declaring types must be registered
//! - Each condition must name a method
//! - The method must resolve with the declared number of parameters
//! - The resolved method must return bool

use crate::condition::locate;
use crate::config::schema::ValidationConfig;
use crate::error::{RequisiteError, Result};
use crate::reflect::{TypeRef, TypeRegistry};

/// A problem found in a declaration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Type the rule is declared on
    pub type_name: String,
    /// Field name if the issue is field-specific
    pub field: Option<String>,
}

/// Check declarations against a registry and return all issues.
///
/// Collects every issue rather than stopping at the first one.
pub fn validate_config(config: &ValidationConfig, registry: &TypeRegistry) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (type_name, rules) in &config.types {
        let ty = TypeRef::named(type_name);
        if !registry.contains(&ty) {
            issues.push(ConfigIssue {
                rule: "unknown-type".to_string(),
                message: format!("Rules declared on unknown type '{}'", type_name),
                type_name: type_name.clone(),
                field: None,
            });
            continue;
        }

        for (field, rule) in &rules.fields {
            let issue = |id: &str, message: String| ConfigIssue {
                rule: id.to_string(),
                message,
                type_name: type_name.clone(),
                field: Some(field.clone()),
            };
            let condition = &rule.required_if;

            if condition.method.trim().is_empty() {
                issues.push(issue(
                    "empty-method",
                    format!("Field '{}.{}' has no condition method", type_name, field),
                ));
                continue;
            }

            let scope = match &condition.declaring_type {
                Some(declared) => {
                    let declared = TypeRef::named(declared);
                    if !registry.contains(&declared) {
                        issues.push(issue(
                            "unknown-declaring-type",
                            format!(
                                "Field '{}.{}' references unknown declaring type '{}'",
                                type_name, field, declared
                            ),
                        ));
                        continue;
                    }
                    declared
                }
                None => ty.clone(),
            };

            match locate(
                registry,
                &scope,
                &condition.method,
                None,
                condition.parameters.len(),
            ) {
                Ok(candidate) if *candidate.return_type() != TypeRef::Bool => {
                    issues.push(issue(
                        "non-bool-condition",
                        format!(
                            "Condition method '{}' on '{}' returns {}, not bool",
                            condition.method,
                            scope,
                            candidate.return_type()
                        ),
                    ));
                }
                Ok(_) => {}
                Err(e) => issues.push(issue(
                    "unresolved-condition",
                    format!("Field '{}.{}': {}", type_name, field, e),
                )),
            }
        }
    }

    issues
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any declaration is broken.
pub fn validate(config: &ValidationConfig, registry: &TypeRegistry) -> Result<()> {
    let issues = validate_config(config, registry);

    if issues.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = issues.iter().map(|i| i.message.clone()).collect();
        Err(RequisiteError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
