//! Integration tests for predicate resolution through the public API.

use requisite::condition::{is_required, ConditionSpec, FailureKind, MatchRank, Outcome};
use requisite::reflect::{Introspect, MethodDef, Object, TypeDef, TypeRef, TypeRegistry, Value};
use requisite::RequisiteError;
use std::sync::{Arc, Mutex};

fn surname_is_blank(this: Option<&Value>) -> bool {
    this.and_then(Value::as_object)
        .and_then(|p| p.get_str("surname"))
        .is_none_or(|s| s.trim().is_empty())
}

fn people() -> TypeRegistry {
    TypeRegistry::new()
        .with_type(TypeDef::new("Person").method(MethodDef::instance(
            "IsSurnameEmpty",
            |this, _| Ok(Value::Bool(surname_is_blank(this))),
        )))
        .with_type(TypeDef::new("Employee").extends("Person"))
}

fn person(type_name: &str, surname: &str) -> Value {
    Value::from(
        Object::new(type_name)
            .with("surname", surname)
            .with("name", Value::Null),
    )
}

#[test]
fn name_required_when_surname_blank() {
    let registry = people();
    let spec = ConditionSpec::new("IsSurnameEmpty");
    let instance = person("Person", "");

    let outcome = is_required(&registry, &instance, &Value::Null, "Name", &spec).unwrap();
    assert_eq!(outcome.reason(), Some("Name is required"));
    assert_eq!(outcome.failure().unwrap().kind, FailureKind::Missing);
}

#[test]
fn name_optional_when_surname_present() {
    let registry = people();
    let spec = ConditionSpec::new("IsSurnameEmpty");
    let instance = person("Person", "Doe");

    let outcome = is_required(&registry, &instance, &Value::Null, "Name", &spec).unwrap();
    assert_eq!(outcome, Outcome::Success);
}

#[test]
fn inherited_predicate_applies_to_subtype_instances() {
    let registry = people();
    let spec = ConditionSpec::new("IsSurnameEmpty");
    let employee = person("Employee", "  ");

    let outcome = is_required(&registry, &employee, &Value::from(""), "Name", &spec).unwrap();
    assert_eq!(outcome.reason(), Some("Name cannot be empty or whitespace"));
}

#[test]
fn base_typed_predicate_selected_for_subtype_scope() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let registry = TypeRegistry::new()
        .with_type(
            TypeDef::new("Person").method(
                MethodDef::static_fn("NeedsName", move |_, args| {
                    sink.lock().unwrap().push(args[0].describe());
                    Ok(Value::Bool(true))
                })
                .param("Person"),
            ),
        )
        .with_type(TypeDef::new("Employee").extends("Person"));

    let employee = Value::from(Object::new("Employee"));
    let candidate = requisite::condition::locate(
        &registry,
        &TypeRef::named("Employee"),
        "NeedsName",
        Some(&employee),
        0,
    )
    .unwrap();
    assert_eq!(candidate.rank(), MatchRank::ScopeSupertype);

    let spec = ConditionSpec::new("NeedsName");
    let outcome = is_required(&registry, &employee, &Value::Null, "Name", &spec).unwrap();
    assert!(!outcome.is_success());
    assert_eq!(*seen.lock().unwrap(), vec!["Employee".to_string()]);
}

#[test]
fn parameterless_overload_always_wins() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let typed = Arc::clone(&calls);
    let bare = Arc::clone(&calls);
    let registry = TypeRegistry::new().with_type(
        TypeDef::new("Form")
            .method(
                MethodDef::instance("Check", move |_, _| {
                    typed.lock().unwrap().push("typed");
                    Ok(Value::Bool(true))
                })
                .param("Form")
                .param(TypeRef::Int),
            )
            .method(MethodDef::instance("Check", move |_, args| {
                assert!(args.is_empty());
                bare.lock().unwrap().push("bare");
                Ok(Value::Bool(false))
            })),
    );

    let spec = ConditionSpec::new("Check").with_parameter(5);
    let form = Value::from(Object::new("Form"));
    let outcome = is_required(&registry, &form, &Value::Null, "Field", &spec).unwrap();

    assert!(outcome.is_success());
    assert_eq!(*calls.lock().unwrap(), vec!["bare"]);
}

#[test]
fn external_declaring_type_receives_instance_and_parameters() {
    let registry = TypeRegistry::new()
        .with_type(TypeDef::new("Account"))
        .with_type(
            TypeDef::new("AccountRules").method(
                MethodDef::static_fn("BalanceBetween", |_, args| {
                    let balance = args[0]
                        .as_object()
                        .and_then(|a| a.get("balance"))
                        .and_then(Value::as_int)
                        .unwrap_or_default();
                    let low = args[1].as_int().unwrap_or_default();
                    let high = args[2].as_int().unwrap_or_default();
                    Ok(Value::Bool(low <= balance && balance <= high))
                })
                .param("Account")
                .param(TypeRef::Int)
                .param(TypeRef::Int),
            ),
        );

    let spec = ConditionSpec::new("BalanceBetween")
        .with_declaring_type("AccountRules")
        .with_parameters([100, 1000]);

    let inside = Value::from(Object::new("Account").with("balance", 500));
    let outside = Value::from(Object::new("Account").with("balance", 5));

    assert!(!is_required(&registry, &inside, &Value::Null, "Reviewer", &spec)
        .unwrap()
        .is_success());
    assert!(is_required(&registry, &outside, &Value::Null, "Reviewer", &spec)
        .unwrap()
        .is_success());
}

#[test]
fn allow_blank_accepts_whitespace() {
    let registry = people();
    let spec = ConditionSpec::new("IsSurnameEmpty").with_allow_blank(true);
    let instance = person("Person", "");

    let outcome = is_required(&registry, &instance, &Value::from("   "), "Name", &spec).unwrap();
    assert!(outcome.is_success());
}

#[test]
fn unknown_predicate_is_method_not_found() {
    let registry = people();
    let spec = ConditionSpec::new("IsMiddleNameEmpty");
    let instance = person("Employee", "");

    let err = is_required(&registry, &instance, &Value::Null, "Name", &spec).unwrap_err();
    match err {
        RequisiteError::MethodNotFound { method, scope } => {
            assert_eq!(method, "IsMiddleNameEmpty");
            assert_eq!(scope, TypeRef::named("Employee"));
        }
        other => panic!("Expected MethodNotFound, got {other:?}"),
    }
}

#[test]
fn non_bool_predicate_rejected_before_running() {
    let ran = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ran);
    let registry = TypeRegistry::new().with_type(
        TypeDef::new("Form").method(
            MethodDef::instance("Check", move |_, _| {
                *flag.lock().unwrap() = true;
                Ok(Value::from("yes"))
            })
            .returns(TypeRef::String),
        ),
    );

    let spec = ConditionSpec::new("Check");
    let form = Value::from(Object::new("Form"));
    let err = is_required(&registry, &form, &Value::Null, "Field", &spec).unwrap_err();

    assert!(matches!(err, RequisiteError::InvalidReturnType { .. }));
    assert!(err.is_configuration_error());
    assert!(!*ran.lock().unwrap());
}

#[test]
fn predicate_failure_propagates() {
    let registry = TypeRegistry::new().with_type(TypeDef::new("Form").method(
        MethodDef::instance("Check", |_, _| Err(anyhow::anyhow!("database unavailable"))),
    ));

    let spec = ConditionSpec::new("Check");
    let form = Value::from(Object::new("Form"));
    let err = is_required(&registry, &form, &Value::Null, "Field", &spec).unwrap_err();

    assert!(matches!(
        err,
        RequisiteError::InvocationFailed { ref field, .. } if field.as_deref() == Some("Field")
    ));
    assert!(err.to_string().contains("database unavailable"));
    assert!(err.to_string().contains("'Field'"));
}

#[test]
fn custom_introspection_drives_resolution() {
    /// Every type answers `Always` with true; nothing is a subtype of anything else.
    struct Flat {
        method: Arc<MethodDef>,
    }

    impl Introspect for Flat {
        fn methods_named(&self, _scope: &TypeRef, name: &str) -> Vec<Arc<MethodDef>> {
            if name == self.method.name() {
                vec![Arc::clone(&self.method)]
            } else {
                vec![]
            }
        }

        fn type_of(&self, value: &Value) -> Option<TypeRef> {
            value.runtime_type()
        }

        fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
            sub == sup || *sup == TypeRef::Object
        }

        fn invoke(
            &self,
            method: &MethodDef,
            _receiver: Option<&Value>,
            _args: &[Value],
        ) -> anyhow::Result<Value> {
            Ok(Value::Bool(method.name() == "Always"))
        }
    }

    let flat = Flat {
        method: Arc::new(MethodDef::static_fn("Always", |_, _| Ok(Value::Bool(false)))),
    };
    let spec = ConditionSpec::new("Always");
    let widget = Value::from(Object::new("Widget"));

    let outcome = is_required(&flat, &widget, &Value::Null, "Label", &spec).unwrap();
    assert_eq!(outcome.reason(), Some("Label is required"));
}
