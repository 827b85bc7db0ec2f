//! Lowering from the generic [`Node`] tree into the typed AST.
//!
//! The node kinds are the tags a Brew parser emits (`func`, `fcall`, `=`,
//! `+`, ...). Lowering checks shape only: unknown kinds, missing fields and
//! fields of the wrong shape. Name resolution and typing happen at runtime.

use std::sync::Arc;

use crate::ast::{BinaryOp, Expr, FunctionDef, Param, Place, Program, Stmt, UnaryOp};
use crate::node::{Field, Node};
use crate::{Name, StringInterner};

/// A malformed node tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LowerError {
    #[error("unknown {context} kind `{kind}`")]
    UnknownKind { context: &'static str, kind: String },
    #[error("`{kind}` node is missing field `{field}`")]
    MissingField { kind: String, field: &'static str },
    #[error("`{kind}` node field `{field}` must be a {expected}, found a {found}")]
    WrongField {
        kind: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid assignment or member target `{name}`")]
    BadTarget { name: String },
}

/// Lower a `program` node into a [`Program`].
pub fn lower_program(root: &Node, interner: &StringInterner) -> Result<Program, LowerError> {
    Lowerer { interner }.program(root)
}

struct Lowerer<'a> {
    interner: &'a StringInterner,
}

impl Lowerer<'_> {
    fn program(&self, node: &Node) -> Result<Program, LowerError> {
        expect_kind(node, "program", "root")?;
        let functions = list(node, "functions")?
            .iter()
            .map(|f| {
                expect_kind(f, "func", "top-level")?;
                let name = self.interner.intern(string(f, "name")?);
                self.function(f, name).map(Arc::new)
            })
            .collect::<Result<_, _>>()?;
        Ok(Program { functions })
    }

    fn function(&self, node: &Node, name: Name) -> Result<FunctionDef, LowerError> {
        let params = match node.get("args") {
            None => Vec::new(),
            Some(_) => list(node, "args")?
                .iter()
                .map(|p| self.param(p))
                .collect::<Result<_, _>>()?,
        };
        let body = self.block(node, "statements")?;
        Ok(FunctionDef { name, params, body })
    }

    fn param(&self, node: &Node) -> Result<Param, LowerError> {
        let name = self.interner.intern(string(node, "name")?);
        match node.kind.as_str() {
            "arg" => Ok(Param::by_value(name)),
            "refarg" => Ok(Param::by_ref(name)),
            other => Err(unknown("parameter", other)),
        }
    }

    /// Lower a statement list field. A missing field is an empty block.
    fn block(&self, node: &Node, field: &'static str) -> Result<Vec<Stmt>, LowerError> {
        match node.get(field) {
            None => Ok(Vec::new()),
            Some(_) => list(node, field)?.iter().map(|s| self.stmt(s)).collect(),
        }
    }

    fn stmt(&self, node: &Node) -> Result<Stmt, LowerError> {
        match node.kind.as_str() {
            "=" => {
                let target = self.place(string(node, "name")?)?;
                let value = self.expr(child(node, "expression")?)?;
                Ok(Stmt::Assign { target, value })
            }
            "if" => {
                let cond = self.expr(child(node, "condition")?)?;
                let then_branch = self.block(node, "statements")?;
                let else_branch = match node.get("else_statements") {
                    None => None,
                    Some(_) => Some(self.block(node, "else_statements")?),
                };
                Ok(Stmt::If {
                    cond,
                    then_branch,
                    else_branch,
                })
            }
            "while" => {
                let cond = self.expr(child(node, "condition")?)?;
                let body = self.block(node, "statements")?;
                Ok(Stmt::While { cond, body })
            }
            "return" => match node.get("expression") {
                None => Ok(Stmt::Return(None)),
                Some(_) => Ok(Stmt::Return(Some(self.expr(child(node, "expression")?)?))),
            },
            "fcall" | "mcall" => Ok(Stmt::Expr(self.expr(node)?)),
            other => Err(unknown("statement", other)),
        }
    }

    fn expr(&self, node: &Node) -> Result<Expr, LowerError> {
        let kind = node.kind.as_str();
        if let Some(op) = BinaryOp::from_symbol(kind) {
            let left = self.expr(child(node, "op1")?)?;
            let right = self.expr(child(node, "op2")?)?;
            return Ok(Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        match kind {
            "int" => match field(node, "val")? {
                Field::Int(v) => Ok(Expr::Int(*v)),
                other => Err(wrong(node, "val", "int", other)),
            },
            "bool" => match field(node, "val")? {
                Field::Bool(v) => Ok(Expr::Bool(*v)),
                other => Err(wrong(node, "val", "bool", other)),
            },
            "string" => Ok(Expr::Str(string(node, "val")?.to_owned())),
            "nil" => Ok(Expr::Nil),
            "@" => Ok(Expr::NewObject),
            "var" => Ok(match self.place(string(node, "name")?)? {
                Place::Var(name) => Expr::Var(name),
                Place::Member { object, field } => Expr::Member { object, field },
            }),
            "lambda" => Ok(Expr::Lambda(Arc::new(self.function(node, Name::EMPTY)?))),
            "fcall" => Ok(Expr::Call {
                callee: self.interner.intern(string(node, "name")?),
                args: self.args(node)?,
            }),
            "mcall" => Ok(Expr::MethodCall {
                object: self.interner.intern(string(node, "objref")?),
                method: self.interner.intern(string(node, "name")?),
                args: self.args(node)?,
            }),
            "neg" => self.unary(node, UnaryOp::Neg),
            "!" => self.unary(node, UnaryOp::Not),
            other => Err(unknown("expression", other)),
        }
    }

    fn unary(&self, node: &Node, op: UnaryOp) -> Result<Expr, LowerError> {
        let operand = self.expr(child(node, "op1")?)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn args(&self, node: &Node) -> Result<Vec<Expr>, LowerError> {
        match node.get("args") {
            None => Ok(Vec::new()),
            Some(_) => list(node, "args")?.iter().map(|a| self.expr(a)).collect(),
        }
    }

    /// Split `obj.field` into a member place; plain names are variables.
    fn place(&self, text: &str) -> Result<Place, LowerError> {
        let mut parts = text.split('.');
        let (Some(first), second, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(LowerError::BadTarget {
                name: text.to_owned(),
            });
        };
        if first.is_empty() || second.is_some_and(str::is_empty) {
            return Err(LowerError::BadTarget {
                name: text.to_owned(),
            });
        }
        let object = self.interner.intern(first);
        Ok(match second {
            None => Place::Var(object),
            Some(field) => Place::Member {
                object,
                field: self.interner.intern(field),
            },
        })
    }
}

// Field accessors

fn expect_kind(node: &Node, kind: &str, context: &'static str) -> Result<(), LowerError> {
    if node.kind == kind {
        Ok(())
    } else {
        Err(unknown(context, &node.kind))
    }
}

fn field<'n>(node: &'n Node, name: &'static str) -> Result<&'n Field, LowerError> {
    node.get(name).ok_or_else(|| LowerError::MissingField {
        kind: node.kind.clone(),
        field: name,
    })
}

fn child<'n>(node: &'n Node, name: &'static str) -> Result<&'n Node, LowerError> {
    match field(node, name)? {
        Field::Node(n) => Ok(n),
        other => Err(wrong(node, name, "node", other)),
    }
}

fn list<'n>(node: &'n Node, name: &'static str) -> Result<&'n [Node], LowerError> {
    match field(node, name)? {
        Field::List(items) => Ok(items),
        other => Err(wrong(node, name, "list", other)),
    }
}

fn string<'n>(node: &'n Node, name: &'static str) -> Result<&'n str, LowerError> {
    match field(node, name)? {
        Field::Str(s) => Ok(s),
        other => Err(wrong(node, name, "string", other)),
    }
}

fn unknown(context: &'static str, kind: &str) -> LowerError {
    LowerError::UnknownKind {
        context,
        kind: kind.to_owned(),
    }
}

fn wrong(node: &Node, field: &'static str, expected: &'static str, found: &Field) -> LowerError {
    LowerError::WrongField {
        kind: node.kind.clone(),
        field,
        expected,
        found: found.shape(),
    }
}
