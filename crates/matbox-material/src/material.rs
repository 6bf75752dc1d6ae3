//! Compiled materials as owned by the scene store.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::Arc;

use matbox_core::{
    Colors, DirectCall, Dumper, Expression, ExpressionList, Hash128, Tag, Transaction, Value,
    ValueList,
};
use serde::{Deserialize, Serialize};

use crate::dag::DagNode;
use crate::error::MaterialError;
use crate::instance::MaterialInstance;
use crate::invariants::{
    ensure_backward_temporaries, ensure_call_body, ensure_constructor, ensure_parameter,
    ensure_temporary,
};
use crate::properties::MaterialProperties;
use crate::slot::Slot;

/// Scene-unit and spectral context a material was compiled for.
///
/// ```
/// use matbox_material::UnitContext;
///
/// let ctx = UnitContext::new()
///     .meters_per_scene_unit(0.01)
///     .wavelength_range(400.0, 700.0);
/// assert_eq!(ctx.wavelength_min(), 400.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitContext {
    meters_per_scene_unit: f32,
    wavelength_min: f32,
    wavelength_max: f32,
}

impl Default for UnitContext {
    fn default() -> Self {
        Self {
            meters_per_scene_unit: 1.0,
            wavelength_min: 380.0,
            wavelength_max: 780.0,
        }
    }
}

impl UnitContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meters_per_scene_unit(mut self, value: f32) -> Self {
        self.meters_per_scene_unit = value;
        self
    }

    /// Wavelength bounds in nanometers.
    pub fn wavelength_range(mut self, min: f32, max: f32) -> Self {
        self.wavelength_min = min;
        self.wavelength_max = max;
        self
    }

    pub fn wavelength_min(&self) -> f32 {
        self.wavelength_min
    }

    pub fn wavelength_max(&self) -> f32 {
        self.wavelength_max
    }
}

/// Immutable, content-addressed form of a compiled material instance.
///
/// Body, temporaries and arguments are shared handles; clones are cheap and
/// never alias mutable state. Field order is the persisted order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompiledMaterial {
    body: Arc<DirectCall>,
    temporaries: Arc<ExpressionList>,
    arguments: Arc<ValueList>,
    hash: Hash128,
    slot_hashes: [Hash128; Slot::COUNT],
    meters_per_scene_unit: f32,
    wavelength_min: f32,
    wavelength_max: f32,
    properties: MaterialProperties,
}

impl CompiledMaterial {
    /// Convert compiler output. Hashes and property bits are taken verbatim.
    ///
    /// # Panics
    ///
    /// If the instance has no constructor call, reports inconsistent
    /// temporary/parameter counts, or a temporary refers to itself or to a
    /// later temporary.
    pub fn from_instance(instance: &dyn MaterialInstance, context: UnitContext) -> Self {
        let body = ensure_call_body(convert(ensure_constructor(instance.constructor())));

        let temporaries: ExpressionList = (0..instance.temporary_count())
            .map(|i| {
                let node = ensure_temporary(instance.temporary(i), i);
                (i.to_string(), convert(node))
            })
            .collect();
        ensure_backward_temporaries(forward_temporary(&temporaries));

        let arguments: ValueList = (0..instance.parameter_count())
            .map(|i| {
                let (name, default) = ensure_parameter(
                    instance.parameter_name(i),
                    instance.parameter_default(i),
                    i,
                );
                (name, default.clone())
            })
            .collect();

        let slot_hashes = Slot::ALL.map(|s| Hash128::from_digest(instance.slot_hash(s)));
        let hash = Hash128::from_digest(instance.hash());

        log::debug!(
            "compiled material {hash}: {} temporaries, {} arguments",
            temporaries.len(),
            arguments.len()
        );

        Self {
            body: Arc::new(body),
            temporaries: Arc::new(temporaries),
            arguments: Arc::new(arguments),
            hash,
            slot_hashes,
            meters_per_scene_unit: context.meters_per_scene_unit,
            wavelength_min: context.wavelength_min,
            wavelength_max: context.wavelength_max,
            properties: MaterialProperties::from_bits(instance.properties()),
        }
    }

    pub fn body(&self) -> Arc<DirectCall> {
        self.body.clone()
    }

    pub(crate) fn body_ref(&self) -> &DirectCall {
        &self.body
    }

    pub fn temporaries(&self) -> Arc<ExpressionList> {
        self.temporaries.clone()
    }

    pub fn temporary_count(&self) -> usize {
        self.temporaries.len()
    }

    pub fn temporary(&self, index: usize) -> Option<&Expression> {
        self.temporaries.get(index)
    }

    pub fn arguments(&self) -> Arc<ValueList> {
        self.arguments.clone()
    }

    pub fn parameter_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn argument(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }

    pub fn parameter_name(&self, index: usize) -> Option<&str> {
        self.arguments.name(index)
    }

    pub fn hash(&self) -> Hash128 {
        self.hash
    }

    pub fn slot_hash(&self, slot: Slot) -> Hash128 {
        self.slot_hashes[slot.index()]
    }

    /// Slot hash by raw index; unknown indices yield [`Hash128::ZERO`].
    pub fn slot_hash_at(&self, index: u32) -> Hash128 {
        Slot::from_index(index)
            .map(|s| self.slot_hash(s))
            .unwrap_or(Hash128::ZERO)
    }

    pub fn slot_hashes(&self) -> &[Hash128; Slot::COUNT] {
        &self.slot_hashes
    }

    pub fn meters_per_scene_unit(&self) -> f32 {
        self.meters_per_scene_unit
    }

    pub fn wavelength_min(&self) -> f32 {
        self.wavelength_min
    }

    pub fn wavelength_max(&self) -> f32 {
        self.wavelength_max
    }

    pub fn properties(&self) -> MaterialProperties {
        self.properties
    }

    /// Exchange contents with `other` (copy-on-write replacement in the store).
    pub fn swap(&mut self, other: &mut CompiledMaterial) {
        std::mem::swap(self, other);
    }

    /// Every valid resource tag referenced by body, temporaries or arguments.
    pub fn referenced_tags(&self) -> BTreeSet<Tag> {
        let mut tags = BTreeSet::new();
        self.body.arguments.collect_tags(&mut tags);
        self.temporaries.collect_tags(&mut tags);
        for (_, v) in self.arguments.iter() {
            v.collect_tags(&mut tags);
        }
        tags
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }

    /// Restore a material written by [`to_bytes`](Self::to_bytes).
    ///
    /// Temporaries may only refer to lower-indexed temporaries; anything else
    /// is rejected so lookups over the restored material terminate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MaterialError> {
        let material: Self = postcard::from_bytes(bytes).map_err(MaterialError::Decode)?;
        if let Some((index, target)) = forward_temporary(&material.temporaries) {
            return Err(MaterialError::ForwardTemporary { index, target });
        }
        Ok(material)
    }

    /// Multi-section text trace: arguments, temporaries, body, hashes, context.
    pub fn dump(&self, transaction: Option<&dyn Transaction>, colors: Colors) -> String {
        let d = Dumper::new(transaction, colors);
        let mut out = String::new();

        out.push_str("Arguments:\n");
        out.push_str(&d.value_list(&self.arguments));
        out.push_str("Temporaries:\n");
        out.push_str(&d.expression_list(&self.temporaries));
        out.push_str("Body:\n");
        out.push_str(&d.call(&self.body));
        out.push('\n');

        writeln!(out, "Hash: {}", self.hash).unwrap();
        for (i, h) in self.slot_hashes.iter().enumerate() {
            writeln!(out, "Slot hash[{i}]: {h}").unwrap();
        }
        writeln!(out, "Meters per scene unit: {}", self.meters_per_scene_unit).unwrap();
        writeln!(out, "Wavelength min: {}", self.wavelength_min).unwrap();
        writeln!(out, "Wavelength max: {}", self.wavelength_max).unwrap();
        writeln!(out, "Properties: {}", self.properties).unwrap();
        out
    }

    /// Emit [`dump`](Self::dump) line by line at info level.
    pub fn log_dump(&self, transaction: Option<&dyn Transaction>) {
        for line in self.dump(transaction, Colors::OFF).lines() {
            log::info!("{line}");
        }
    }
}

/// First `(temporary, target)` pair where a temporary refers to itself or a
/// later temporary.
fn forward_temporary(temporaries: &ExpressionList) -> Option<(usize, usize)> {
    temporaries
        .iter()
        .enumerate()
        .find_map(|(i, (_, expr))| temporary_at_or_above(expr, i).map(|target| (i, target)))
}

fn temporary_at_or_above(expr: &Expression, bound: usize) -> Option<usize> {
    match expr {
        Expression::Temporary { index, .. } if *index >= bound => Some(*index),
        Expression::Call(call) => call
            .arguments
            .iter()
            .find_map(|(_, arg)| temporary_at_or_above(arg, bound)),
        _ => None,
    }
}

fn convert(node: &DagNode) -> Expression {
    match node {
        DagNode::Constant(v) => Expression::Constant(v.clone()),
        DagNode::Call {
            definition,
            ty,
            arguments,
        } => Expression::Call(DirectCall::new(
            definition.clone(),
            ty.clone(),
            arguments
                .iter()
                .map(|(name, arg)| (name.clone(), convert(arg)))
                .collect(),
        )),
        DagNode::Parameter { index, ty } => Expression::Parameter {
            index: *index,
            ty: ty.clone(),
        },
        DagNode::Temporary { index, ty } => Expression::Temporary {
            index: *index,
            ty: ty.clone(),
        },
    }
}
