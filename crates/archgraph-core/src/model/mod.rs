//! Typed program model consumed by the analyzer.
//!
//! The model is produced by an external front end after type checking. It is
//! read-only here: the analysis passes never mutate it.
//!
//! ## Components
//!
//! - [`ProgramModel`] - one module: classes, top-level functions, library declarations
//! - [`ClassDecl`] / [`FunctionDecl`] - declarations with metadata tags
//! - [`Expr`] - call expressions with statically resolved types
//! - [`TypeRef`] - class types, type parameters, star projections
//! - [`ModelSource`] - where a model comes from

mod decl;
mod expr;
mod source;
mod types;

pub use decl::{
    Annotation, AnnotationArg, ClassDecl, ClassLiteral, FunctionDecl, ParamDecl, ProgramModel,
};
pub use expr::{walk, ConstructorCall, Expr, MethodCall};
pub use source::{JsonModelSource, ModelSource};
pub use types::TypeRef;
