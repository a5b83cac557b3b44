//! Declarations: classes, functions, parameters and their metadata tags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::types::TypeRef;

/// A metadata tag attached to a class or function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully-qualified tag name.
    pub name: String,
    #[serde(default)]
    pub args: BTreeMap<String, AnnotationArg>,
}

/// A tag argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationArg {
    Bool(bool),
    Text(String),
    Class(ClassLiteral),
    Classes(Vec<ClassLiteral>),
}

/// A class literal such as `Foo::class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLiteral {
    pub class: String,
}

impl Annotation {
    /// String argument `name`, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.args.get(name) {
            Some(AnnotationArg::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Boolean argument `name`, if present and boolean.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.args.get(name) {
            Some(AnnotationArg::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// First class literal of argument `name`.
    pub fn class_arg(&self, name: &str) -> Option<&str> {
        match self.args.get(name) {
            Some(AnnotationArg::Class(lit)) => Some(&lit.class),
            Some(AnnotationArg::Classes(lits)) => lits.first().map(|l| l.class.as_str()),
            _ => None,
        }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A method, constructor or top-level function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub body: Vec<Expr>,
}

impl FunctionDecl {
    /// The tag named `name`, if the function carries it.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }
}

/// A class, interface or object declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    /// Fully-qualified name, nested classes included (`a.b.Outer.Inner`).
    pub name: String,
    /// Fully-qualified name of the enclosing class for nested declarations.
    #[serde(default)]
    pub outer: Option<String>,
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Declared supertypes, in declaration order.
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    /// Source file declaring the class.
    #[serde(default)]
    pub file: Option<String>,
}

impl ClassDecl {
    /// Last segment of the fully-qualified name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The tag named `name`, if the class carries it.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

/// One module's worth of declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramModel {
    /// Module name, used for logging only.
    #[serde(default)]
    pub module: String,
    /// Source files of the module, used to locate the output directory.
    #[serde(default)]
    pub files: Vec<String>,
    /// Declarations analyzed by this run, in traversal order.
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    /// Top-level functions.
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    /// External declarations, consulted for hierarchy lookups only.
    #[serde(default)]
    pub libraries: Vec<ClassDecl>,
}

impl ProgramModel {
    /// Source files: declared files first, then any file named by a class.
    pub fn source_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.files.iter().map(String::as_str).collect();
        for class in &self.classes {
            if let Some(file) = class.file.as_deref() {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        files
    }
}
