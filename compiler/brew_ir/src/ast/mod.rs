//! Typed AST consumed by the evaluator.
//!
//! Produced by [`lower_program`](crate::lower_program) from a generic
//! [`Node`](crate::Node) tree, or built directly with [`crate::build`].
//! Function bodies are shared (`Arc`) because closures hold a reference to
//! the lambda node they were created from.

mod operators;

use std::sync::Arc;

use crate::Name;

pub use operators::{BinaryOp, UnaryOp};

/// Shared handle to a function or lambda definition.
pub type SharedFunction = Arc<FunctionDef>;

/// A whole program: its top-level function definitions, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<SharedFunction>,
}

/// A named function or an anonymous lambda.
///
/// Lambdas carry [`Name::EMPTY`] as their name.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

impl FunctionDef {
    /// Number of formal parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this definition came from a lambda literal.
    #[inline]
    pub fn is_lambda(&self) -> bool {
        self.name == Name::EMPTY
    }
}

/// How an actual argument is bound to a formal parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamMode {
    /// The parameter gets its own copy.
    Value,
    /// Assignments to the parameter propagate back to the caller's variable.
    Reference,
}

/// A formal parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub mode: ParamMode,
}

impl Param {
    pub fn by_value(name: Name) -> Self {
        Param {
            name,
            mode: ParamMode::Value,
        }
    }

    pub fn by_ref(name: Name) -> Self {
        Param {
            name,
            mode: ParamMode::Reference,
        }
    }
}

/// Left-hand side of an assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Place {
    /// `name = ...`
    Var(Name),
    /// `object.field = ...`
    Member { object: Name, field: Name },
}

/// Statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Assign {
        target: Place,
        value: Expr,
    },
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    /// A call evaluated for its side effects; the result is discarded.
    Expr(Expr),
}

/// Expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Int(i64),
    Bool(bool),
    Str(String),
    Nil,
    /// Variable reference (or a top-level function used as a value).
    Var(Name),
    /// `object.field`
    Member {
        object: Name,
        field: Name,
    },
    Lambda(SharedFunction),
    /// `@`: a fresh empty object.
    NewObject,
    Call {
        callee: Name,
        args: Vec<Expr>,
    },
    /// `object.method(args)`
    MethodCall {
        object: Name,
        method: Name,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

impl Expr {
    /// The variable name if this is a bare variable reference.
    #[inline]
    pub fn as_var(&self) -> Option<Name> {
        match self {
            Expr::Var(name) => Some(*name),
            _ => None,
        }
    }
}
