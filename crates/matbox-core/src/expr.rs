//! Expression trees of compiled materials.

use serde::{Deserialize, Serialize};

use crate::store::Tag;
use crate::types::Type;
use crate::value::Value;

/// Call of a known function definition with named arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectCall {
    pub definition: String,
    pub ty: Type,
    pub arguments: ExpressionList,
}

impl DirectCall {
    pub fn new(definition: impl Into<String>, ty: Type, arguments: ExpressionList) -> Self {
        Self {
            definition: definition.into(),
            ty,
            arguments,
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Expression> {
        self.arguments.find(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Constant(Value),
    Call(DirectCall),
    /// Reference to a material parameter by position.
    Parameter { index: usize, ty: Type },
    /// Reference to a temporary of the enclosing compiled material.
    Temporary { index: usize, ty: Type },
}

impl Expression {
    pub fn ty(&self) -> Type {
        match self {
            Expression::Constant(v) => v.ty(),
            Expression::Call(c) => c.ty.clone(),
            Expression::Parameter { ty, .. } | Expression::Temporary { ty, .. } => ty.clone(),
        }
    }

    pub fn as_call(&self) -> Option<&DirectCall> {
        match self {
            Expression::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn collect_tags(&self, out: &mut impl Extend<Tag>) {
        match self {
            Expression::Constant(v) => v.collect_tags(out),
            Expression::Call(c) => c.arguments.collect_tags(out),
            Expression::Parameter { .. } | Expression::Temporary { .. } => {}
        }
    }
}

/// Ordered list of named expressions (call arguments, temporaries).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    entries: Vec<(String, Expression)>,
}

impl ExpressionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, expr: Expression) {
        self.entries.push((name.into(), expr));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expression> {
        self.entries.get(index).map(|(_, e)| e)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(n, _)| n.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&Expression> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn collect_tags(&self, out: &mut impl Extend<Tag>) {
        for (_, e) in &self.entries {
            e.collect_tags(out);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Expression)> for ExpressionList {
    fn from_iter<I: IntoIterator<Item = (S, Expression)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, e)| (n.into(), e)).collect(),
        }
    }
}
