//! Generic node tree: the host-facing AST shape.
//!
//! Each node has a `kind` tag and a map of named fields. A field holds a
//! child node, a list of children, or a literal. This is what a parser (or a
//! JSON file) hands to the evaluator; [`lower_program`](crate::lower_program)
//! turns it into the typed AST.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of the generic tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Field>,
}

/// A named field of a [`Node`].
///
/// Untagged so the JSON form stays natural: objects are nodes, arrays are
/// node lists, and scalars are literals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Node(Box<Node>),
    List(Vec<Node>),
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Field {
    /// Human-readable shape name for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Field::Node(_) => "node",
            Field::List(_) => "list",
            Field::Bool(_) => "bool",
            Field::Int(_) => "int",
            Field::Str(_) => "string",
        }
    }
}

impl Node {
    /// Create a node with no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Node {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, name: &str, field: impl Into<Field>) -> Self {
        self.fields.insert(name.to_owned(), field.into());
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}

impl From<Node> for Field {
    fn from(node: Node) -> Self {
        Field::Node(Box::new(node))
    }
}

impl From<Vec<Node>> for Field {
    fn from(nodes: Vec<Node>) -> Self {
        Field::List(nodes)
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Int(v)
    }
}

impl From<bool> for Field {
    fn from(v: bool) -> Self {
        Field::Bool(v)
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::Str(v.to_owned())
    }
}

impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::Str(v)
    }
}
