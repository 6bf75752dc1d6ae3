//! Contract checks on compiler output, excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use matbox_core::{DirectCall, Expression, Value};

use crate::dag::DagNode;

pub(crate) fn ensure_constructor(node: Option<&DagNode>) -> &DagNode {
    node.unwrap_or_else(|| panic!("compiled material: instance has no constructor call"))
}

pub(crate) fn ensure_call_body(expr: Expression) -> DirectCall {
    match expr {
        Expression::Call(call) => call,
        other => panic!(
            "compiled material: constructor must be a direct call, got {}",
            other.ty()
        ),
    }
}

pub(crate) fn ensure_temporary(node: Option<&DagNode>, index: usize) -> &DagNode {
    node.unwrap_or_else(|| {
        panic!("compiled material: temporary {index} missing (instance must report a dense list)")
    })
}

pub(crate) fn ensure_parameter<'a>(
    name: Option<&'a str>,
    default: Option<&'a Value>,
    index: usize,
) -> (&'a str, &'a Value) {
    match (name, default) {
        (Some(n), Some(v)) => (n, v),
        _ => panic!("compiled material: parameter {index} has no name or default"),
    }
}

pub(crate) fn ensure_backward_temporaries(forward: Option<(usize, usize)>) {
    if let Some((index, target)) = forward {
        panic!(
            "compiled material: temporary {index} refers to temporary {target} (only lower indices allowed)"
        );
    }
}
