//! Function bodies: call expressions and the values flowing into them.

use serde::{Deserialize, Serialize};

use super::types::TypeRef;

/// One expression of a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Method or function call.
    Call(MethodCall),
    /// Constructor call.
    New(ConstructorCall),
    /// Reference to a local, parameter or field.
    Value {
        #[serde(rename = "type")]
        ty: TypeRef,
    },
    /// Explicit or implicit type conversion.
    Cast {
        expr: Box<Expr>,
        #[serde(rename = "type")]
        ty: TypeRef,
    },
    /// Lambda whose calls belong to the enclosing function.
    Lambda {
        #[serde(default)]
        body: Vec<Expr>,
    },
}

/// A call to a method declared by `owner` (absent for top-level functions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    #[serde(default)]
    pub owner: Option<String>,
    pub method: String,
    #[serde(default)]
    pub receiver: Option<Box<Expr>>,
    #[serde(default)]
    pub args: Vec<Expr>,
    /// Static result type.
    #[serde(rename = "type", default)]
    pub ty: TypeRef,
}

/// A constructor call of `class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorCall {
    pub class: String,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Expr {
    /// Static type of the expression.
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Call(call) => call.ty.clone(),
            Self::New(ctor) => TypeRef::generic(ctor.class.clone(), ctor.type_args.clone()),
            Self::Value { ty } | Self::Cast { ty, .. } => ty.clone(),
            Self::Lambda { .. } => TypeRef::Star,
        }
    }

    /// Strip casts down to the converted expression.
    pub fn unwrap_casts(&self) -> &Expr {
        let mut current = self;
        while let Self::Cast { expr, .. } = current {
            current = expr;
        }
        current
    }

    /// Direct sub-expressions in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Call(call) => call
                .receiver
                .as_deref()
                .into_iter()
                .chain(call.args.iter())
                .collect(),
            Self::New(ctor) => ctor.args.iter().collect(),
            Self::Cast { expr, .. } => vec![expr.as_ref()],
            Self::Lambda { body } => body.iter().collect(),
            Self::Value { .. } => Vec::new(),
        }
    }
}

impl MethodCall {
    /// Argument at `index` with casts stripped.
    pub fn arg(&self, index: usize) -> Option<&Expr> {
        self.args.get(index).map(Expr::unwrap_casts)
    }
}

/// Visit `exprs` and every nested expression, parents before children.
pub fn walk<'a>(exprs: &'a [Expr], visit: &mut dyn FnMut(&'a Expr)) {
    for expr in exprs {
        walk_expr(expr, visit);
    }
}

fn walk_expr<'a>(expr: &'a Expr, visit: &mut dyn FnMut(&'a Expr)) {
    visit(expr);
    for child in expr.children() {
        walk_expr(child, visit);
    }
}
