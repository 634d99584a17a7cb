//! Type registry.
//!
//! The [`TypeRegistry`] stores every type the host has declared together
//! with its parent and its methods, and answers the [`Introspect`] queries
//! predicate resolution makes against it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use super::introspect::Introspect;
use super::method::{MethodDef, Visibility};
use super::types::TypeRef;
use super::value::Value;

/// A type declaration: name, optional parent, and methods.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    parent: Option<TypeRef>,
    methods: Vec<Arc<MethodDef>>,
}

impl TypeDef {
    /// Start declaring a type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            methods: Vec::new(),
        }
    }

    /// Set the parent type.
    pub fn extends(mut self, parent: impl Into<TypeRef>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a method, in declaration order.
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&TypeRef> {
        self.parent.as_ref()
    }

    pub fn methods(&self) -> &[Arc<MethodDef>] {
        &self.methods
    }
}

/// Registry of all declared types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any earlier declaration of the same name.
    pub fn register(&mut self, def: TypeDef) {
        if let Some(previous) = self.types.insert(def.name.clone(), def) {
            warn!("Type '{}' registered twice; keeping the latest", previous.name);
        }
    }

    /// Builder-style [`TypeRegistry::register`].
    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.register(def);
        self
    }

    /// Get a type declaration.
    pub fn get(&self, ty: &TypeRef) -> Option<&TypeDef> {
        match ty {
            TypeRef::Named(name) => self.types.get(name),
            _ => None,
        }
    }

    /// Whether a type is known: built-in or registered.
    pub fn contains(&self, ty: &TypeRef) -> bool {
        ty.is_builtin() || self.get(ty).is_some()
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// `ty` followed by its ancestors, nearest first.
    ///
    /// Stops at a parent that is not registered (after including it) or
    /// at the first repeated type, so a parent cycle cannot loop forever.
    /// `object` is implicit and never listed.
    pub fn lineage(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut chain = vec![ty.clone()];
        let mut seen: HashSet<TypeRef> = HashSet::from([ty.clone()]);
        let mut current = self.get(ty);

        while let Some(parent) = current.and_then(TypeDef::parent) {
            if !seen.insert(parent.clone()) {
                warn!("Inheritance cycle detected at type '{}'", parent);
                break;
            }
            chain.push(parent.clone());
            current = self.get(parent);
        }

        chain
    }
}

impl Introspect for TypeRegistry {
    fn methods_named(&self, scope: &TypeRef, name: &str) -> Vec<Arc<MethodDef>> {
        let mut found: Vec<Arc<MethodDef>> = Vec::new();

        for (depth, ty) in self.lineage(scope).iter().enumerate() {
            let Some(def) = self.get(ty) else {
                continue;
            };
            for method in def.methods.iter().filter(|m| m.name() == name) {
                if depth > 0 && method.visibility_level() == Visibility::Private {
                    continue;
                }
                // A redeclaration on a more derived type hides the inherited one.
                let hidden = found.iter().any(|m| {
                    m.parameter_types() == method.parameter_types()
                        && m.dispatch() == method.dispatch()
                });
                if !hidden {
                    found.push(Arc::clone(method));
                }
            }
        }

        found
    }

    fn type_of(&self, value: &Value) -> Option<TypeRef> {
        value.runtime_type()
    }

    fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        if sub == sup || *sup == TypeRef::Object {
            return true;
        }
        self.lineage(sub).iter().any(|ty| ty == sup)
    }

    fn invoke(
        &self,
        method: &MethodDef,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> anyhow::Result<Value> {
        method.call(receiver, args)
    }
}
