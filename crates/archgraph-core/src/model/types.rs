//! Type references as they appear in supertypes, signatures and expressions.

use serde::{Deserialize, Serialize};

/// A statically resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A class or interface, possibly with type arguments.
    Class {
        name: String,
        #[serde(default)]
        args: Vec<TypeRef>,
    },
    /// A type parameter declared by class `owner`.
    Param { owner: String, name: String },
    /// Star projection or anything the front end could not resolve.
    Star,
}

impl TypeRef {
    /// Shorthand for a class type without arguments.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Shorthand for a parameterized class type.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Class {
            name: name.into(),
            args,
        }
    }

    /// Shorthand for a type parameter reference.
    pub fn param(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Param {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The class name when this is a class type.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type argument at `index`, skipping star projections.
    pub fn arg(&self, index: usize) -> Option<&TypeRef> {
        match self {
            Self::Class { args, .. } => args.get(index).filter(|a| !matches!(a, TypeRef::Star)),
            _ => None,
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::Star
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{"kind":"class","name":"a.B","args":[{"kind":"param","owner":"a.B","name":"T"},{"kind":"star"}]}"#;
        let ty: TypeRef = serde_json::from_str(json).unwrap();
        assert_eq!(ty.class_name(), Some("a.B"));
        assert_eq!(ty.arg(0), Some(&TypeRef::param("a.B", "T")));
        assert_eq!(ty.arg(1), None);
    }

    #[test]
    fn test_class_without_args() {
        let ty: TypeRef = serde_json::from_str(r#"{"kind":"class","name":"a.C"}"#).unwrap();
        assert_eq!(ty, TypeRef::class("a.C"));
    }
}
