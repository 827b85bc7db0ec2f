//! Brew IR - names, AST and node-tree lowering for the Brew evaluator.
//!
//! # Contents
//!
//! - [`Name`] / [`StringInterner`]: interned identifiers
//! - [`ast`]: the typed AST the evaluator walks
//! - [`Node`]: the generic `kind` + named-fields tree a parser emits
//! - [`lower_program`]: `Node` tree to typed [`Program`]
//! - [`build`]: terse AST constructors for tests and embedders

pub mod ast;
pub mod build;
mod interner;
mod lower;
mod name;
mod node;

pub use ast::{
    BinaryOp, Expr, FunctionDef, Param, ParamMode, Place, Program, SharedFunction, Stmt, UnaryOp,
};
pub use interner::{InternError, StringInterner};
pub use lower::{lower_program, LowerError};
pub use name::Name;
pub use node::{Field, Node};
