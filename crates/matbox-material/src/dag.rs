//! Expression DAG as produced by the shading-language compiler.
//!
//! Nodes are shared through `Arc`, so one sub-expression may be referenced
//! from several call arguments.

use std::sync::Arc;

use matbox_core::{Type, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum DagNode {
    Constant(Value),
    Call {
        definition: String,
        ty: Type,
        arguments: Vec<(String, Arc<DagNode>)>,
    },
    Parameter {
        index: usize,
        ty: Type,
    },
    Temporary {
        index: usize,
        ty: Type,
    },
}

impl DagNode {
    pub fn constant(value: Value) -> Arc<Self> {
        Arc::new(DagNode::Constant(value))
    }

    pub fn call<S: Into<String>>(
        definition: impl Into<String>,
        ty: Type,
        arguments: impl IntoIterator<Item = (S, Arc<DagNode>)>,
    ) -> Arc<Self> {
        Arc::new(DagNode::Call {
            definition: definition.into(),
            ty,
            arguments: arguments
                .into_iter()
                .map(|(n, a)| (n.into(), a))
                .collect(),
        })
    }

    pub fn parameter(index: usize, ty: Type) -> Arc<Self> {
        Arc::new(DagNode::Parameter { index, ty })
    }

    pub fn temporary(index: usize, ty: Type) -> Arc<Self> {
        Arc::new(DagNode::Temporary { index, ty })
    }

    pub fn ty(&self) -> Type {
        match self {
            DagNode::Constant(v) => v.ty(),
            DagNode::Call { ty, .. }
            | DagNode::Parameter { ty, .. }
            | DagNode::Temporary { ty, .. } => ty.clone(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Arc<DagNode>> {
        match self {
            DagNode::Call { arguments, .. } => {
                arguments.iter().find(|(n, _)| n == name).map(|(_, a)| a)
            }
            _ => None,
        }
    }
}
