//! Method descriptors.
//!
//! A [`MethodDef`] is the registry's stand-in for a reflected method: a name,
//! a signature, and a callable body. Bodies receive the receiver (for
//! instance methods) and the bound argument list.

use std::fmt;
use std::sync::Arc;

use super::types::TypeRef;
use super::value::Value;

/// Callable body of a registered method.
///
/// The first argument is the receiver for instance methods and `None` for
/// static ones.
pub type MethodBody = Arc<dyn Fn(Option<&Value>, &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// How a method is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Called on an instance of the declaring type.
    Instance,
    /// Called without a receiver.
    Static,
}

/// Declared visibility of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible on the declaring type and inherited by subtypes.
    #[default]
    Public,
    /// Visible on the declaring type only; not inherited by subtypes.
    Private,
}

/// A method registered on a type.
#[derive(Clone)]
pub struct MethodDef {
    name: String,
    dispatch: Dispatch,
    visibility: Visibility,
    params: Vec<TypeRef>,
    return_type: TypeRef,
    body: MethodBody,
}

impl MethodDef {
    /// Declare an instance method.
    ///
    /// The return type defaults to `bool`; use [`MethodDef::returns`] for
    /// anything else.
    pub fn instance<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::new(name, Dispatch::Instance, body)
    }

    /// Declare a static method.
    pub fn static_fn<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::new(name, Dispatch::Static, body)
    }

    fn new<F>(name: impl Into<String>, dispatch: Dispatch, body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dispatch,
            visibility: Visibility::Public,
            params: Vec::new(),
            return_type: TypeRef::Bool,
            body: Arc::new(body),
        }
    }

    /// Append a parameter of the given type.
    pub fn param(mut self, ty: impl Into<TypeRef>) -> Self {
        self.params.push(ty.into());
        self
    }

    /// Set the declared return type.
    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = ty.into();
        self
    }

    /// Set the declared visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[TypeRef] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.dispatch == Dispatch::Static
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    pub fn visibility_level(&self) -> Visibility {
        self.visibility
    }

    /// Run the body. Signature checks are the caller's job.
    pub(crate) fn call(&self, receiver: Option<&Value>, args: &[Value]) -> anyhow::Result<Value> {
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("dispatch", &self.dispatch)
            .field("visibility", &self.visibility)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<_> = self.params.iter().map(TypeRef::to_string).collect();
        write!(
            f,
            "{}{}({}) -> {}",
            if self.is_static() { "static " } else { "" },
            self.name,
            params.join(", "),
            self.return_type
        )
    }
}
