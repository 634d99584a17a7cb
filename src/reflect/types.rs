//! Type references.
//!
//! A [`TypeRef`] names a type known to the introspection layer: either one
//! of the built-in scalar types, the universal `object` type, or a type
//! registered by the host under its own name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reference to a type by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// The universal type every value is assignable to.
    Object,
    Bool,
    Int,
    Float,
    String,
    List,
    /// A type registered by name in a [`super::TypeRegistry`].
    Named(std::string::String),
}

impl TypeRef {
    /// Reference a host-registered type by name.
    ///
    /// Built-in names (`bool`, `string`, ...) resolve to their built-in
    /// variants so the same type never has two spellings.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::parse(name.as_ref())
    }

    fn parse(name: &str) -> Self {
        match name {
            "object" => TypeRef::Object,
            "bool" => TypeRef::Bool,
            "int" => TypeRef::Int,
            "float" => TypeRef::Float,
            "string" => TypeRef::String,
            "list" => TypeRef::List,
            other => TypeRef::Named(other.to_string()),
        }
    }

    /// The type's name as written in declarations.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Object => "object",
            TypeRef::Bool => "bool",
            TypeRef::Int => "int",
            TypeRef::Float => "float",
            TypeRef::String => "string",
            TypeRef::List => "list",
            TypeRef::Named(name) => name,
        }
    }

    /// Whether this is a built-in type rather than a registered one.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, TypeRef::Named(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TypeRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for TypeRef {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = std::string::String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
