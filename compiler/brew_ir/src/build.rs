//! Terse constructors for typed ASTs.
//!
//! Mostly used by tests, which would otherwise spell out every `Box::new`
//! and `intern` call. Parameter strings starting with `ref ` are by-reference;
//! place and variable names containing a dot become member accesses.

use std::sync::Arc;

use crate::ast::{
    BinaryOp, Expr, FunctionDef, Param, Place, Program, SharedFunction, Stmt, UnaryOp,
};
use crate::{Name, StringInterner};

/// AST builder bound to an interner.
#[derive(Clone, Copy)]
pub struct AstBuilder<'a> {
    interner: &'a StringInterner,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder { interner }
    }

    #[inline]
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn program(&self, functions: Vec<SharedFunction>) -> Program {
        Program { functions }
    }

    /// `func name(params) { body }`
    pub fn func(&self, name: &str, params: &[&str], body: Vec<Stmt>) -> SharedFunction {
        Arc::new(FunctionDef {
            name: self.name(name),
            params: self.params(params),
            body,
        })
    }

    fn params(&self, texts: &[&str]) -> Vec<Param> {
        texts
            .iter()
            .map(|text| match text.strip_prefix("ref ") {
                Some(name) => Param::by_ref(self.name(name.trim())),
                None => Param::by_value(self.name(text)),
            })
            .collect()
    }

    fn place(&self, text: &str) -> Place {
        match text.split_once('.') {
            Some((object, field)) => Place::Member {
                object: self.name(object),
                field: self.name(field),
            },
            None => Place::Var(self.name(text)),
        }
    }

    // Statements

    pub fn assign(&self, target: &str, value: Expr) -> Stmt {
        Stmt::Assign {
            target: self.place(target),
            value,
        }
    }

    pub fn if_then(&self, cond: Expr, then_branch: Vec<Stmt>) -> Stmt {
        Stmt::If {
            cond,
            then_branch,
            else_branch: None,
        }
    }

    pub fn if_else(&self, cond: Expr, then_branch: Vec<Stmt>, else_branch: Vec<Stmt>) -> Stmt {
        Stmt::If {
            cond,
            then_branch,
            else_branch: Some(else_branch),
        }
    }

    pub fn while_loop(&self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::While { cond, body }
    }

    pub fn ret(&self, value: Expr) -> Stmt {
        Stmt::Return(Some(value))
    }

    pub fn ret_nothing(&self) -> Stmt {
        Stmt::Return(None)
    }

    pub fn call_stmt(&self, callee: &str, args: Vec<Expr>) -> Stmt {
        Stmt::Expr(self.call(callee, args))
    }

    pub fn method_stmt(&self, object: &str, method: &str, args: Vec<Expr>) -> Stmt {
        Stmt::Expr(self.method(object, method, args))
    }

    /// `print(args...)` as a statement.
    pub fn print(&self, args: Vec<Expr>) -> Stmt {
        self.call_stmt("print", args)
    }

    // Expressions

    pub fn int(&self, v: i64) -> Expr {
        Expr::Int(v)
    }

    pub fn bool(&self, v: bool) -> Expr {
        Expr::Bool(v)
    }

    pub fn str(&self, v: &str) -> Expr {
        Expr::Str(v.to_owned())
    }

    pub fn nil(&self) -> Expr {
        Expr::Nil
    }

    pub fn new_object(&self) -> Expr {
        Expr::NewObject
    }

    /// Variable reference, or member access for `obj.field`.
    pub fn var(&self, text: &str) -> Expr {
        match self.place(text) {
            Place::Var(name) => Expr::Var(name),
            Place::Member { object, field } => Expr::Member { object, field },
        }
    }

    pub fn lambda(&self, params: &[&str], body: Vec<Stmt>) -> Expr {
        Expr::Lambda(Arc::new(FunctionDef {
            name: Name::EMPTY,
            params: self.params(params),
            body,
        }))
    }

    pub fn call(&self, callee: &str, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: self.name(callee),
            args,
        }
    }

    pub fn method(&self, object: &str, method: &str, args: Vec<Expr>) -> Expr {
        Expr::MethodCall {
            object: self.name(object),
            method: self.name(method),
            args,
        }
    }

    pub fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn neg(&self, operand: Expr) -> Expr {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    }

    pub fn not(&self, operand: Expr) -> Expr {
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }
}
