//! Reference compiler instance with content and slot hashing.
//!
//! The content hash covers the whole body. Temporaries are digested once and
//! stand in for every reference to them.
//! Each slot hash covers only the sub-DAG reached by walking the slot's field
//! path, so materials that differ outside that sub-DAG share the slot hash.

use std::sync::Arc;

use matbox_core::Value;
use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::dag::DagNode;
use crate::instance::MaterialInstance;
use crate::properties::MaterialProperties;
use crate::slot::Slot;

/// Builds a [`CompiledInstance`]: `InstanceBuilder::new().body(..).parameter(..).build()`.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuilder {
    body: Option<Arc<DagNode>>,
    temporaries: Vec<Arc<DagNode>>,
    parameters: Vec<(String, Value)>,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: Arc<DagNode>) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a temporary; its index is the number of temporaries added before.
    pub fn temporary(mut self, node: Arc<DagNode>) -> Self {
        self.temporaries.push(node);
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, default: Value) -> Self {
        self.parameters.push((name.into(), default));
        self
    }

    pub fn build(self) -> CompiledInstance {
        let mut hash = [0u8; 16];
        let mut slot_hashes = [[0u8; 16]; Slot::COUNT];
        let mut properties = MaterialProperties::NONE;

        if let Some(body) = &self.body {
            let hasher = DagHasher::new(&self.temporaries);
            hash = hasher.node(body);

            for slot in Slot::ALL {
                slot_hashes[slot.index()] =
                    hash_slot(&hasher, body, &self.temporaries, slot.path());
            }

            scan_properties(body, &mut properties);
            for t in &self.temporaries {
                scan_properties(t, &mut properties);
            }
        }

        CompiledInstance {
            body: self.body,
            temporaries: self.temporaries,
            parameters: self.parameters,
            hash,
            slot_hashes,
            properties,
        }
    }
}

/// Output of [`InstanceBuilder::build`].
#[derive(Clone, Debug)]
pub struct CompiledInstance {
    body: Option<Arc<DagNode>>,
    temporaries: Vec<Arc<DagNode>>,
    parameters: Vec<(String, Value)>,
    hash: [u8; 16],
    slot_hashes: [[u8; 16]; Slot::COUNT],
    properties: MaterialProperties,
}

impl MaterialInstance for CompiledInstance {
    fn constructor(&self) -> Option<&DagNode> {
        self.body.as_deref()
    }

    fn temporary_count(&self) -> usize {
        self.temporaries.len()
    }

    fn temporary(&self, index: usize) -> Option<&DagNode> {
        self.temporaries.get(index).map(|t| &**t)
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    fn parameter_name(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(|(n, _)| n.as_str())
    }

    fn parameter_default(&self, index: usize) -> Option<&Value> {
        self.parameters.get(index).map(|(_, v)| v)
    }

    fn hash(&self) -> [u8; 16] {
        self.hash
    }

    fn slot_hash(&self, slot: Slot) -> [u8; 16] {
        self.slot_hashes[slot.index()]
    }

    fn properties(&self) -> u32 {
        self.properties.bits()
    }
}

/// Digests of DAG nodes.
///
/// A node's digest covers its own label and the digests of its arguments.
/// Every temporary is digested once, in index order, and a reference to it
/// contributes that digest, so a temporary and its inlined expression hash
/// alike. References to the current or a later temporary are unresolved
/// leaves.
struct DagHasher {
    temporaries: Vec<[u8; 16]>,
}

impl DagHasher {
    fn new(temporaries: &[Arc<DagNode>]) -> Self {
        let mut hasher = Self {
            temporaries: Vec::with_capacity(temporaries.len()),
        };
        for t in temporaries {
            let digest = hasher.node(t);
            hasher.temporaries.push(digest);
        }
        hasher
    }

    fn node(&self, node: &DagNode) -> [u8; 16] {
        let mut state = Xxh3::new();
        match node {
            DagNode::Constant(v) => return self.value(v),
            DagNode::Call {
                definition,
                ty,
                arguments,
            } => {
                state.update(b"f");
                write_str(&mut state, definition);
                write_encoded(&mut state, ty);
                state.update(&(arguments.len() as u64).to_le_bytes());
                for (name, arg) in arguments {
                    write_str(&mut state, name);
                    state.update(&self.node(arg));
                }
            }
            DagNode::Parameter { index, ty } => {
                state.update(b"p");
                state.update(&(*index as u64).to_le_bytes());
                write_encoded(&mut state, ty);
            }
            DagNode::Temporary { index, ty } => {
                if let Some(digest) = self.temporaries.get(*index) {
                    return *digest;
                }
                state.update(b"t");
                state.update(&(*index as u64).to_le_bytes());
                write_encoded(&mut state, ty);
            }
        }
        finish(state)
    }

    fn value(&self, value: &Value) -> [u8; 16] {
        let mut state = Xxh3::new();
        state.update(b"c");
        write_encoded(&mut state, value);
        finish(state)
    }
}

fn write_str(state: &mut Xxh3, s: &str) {
    state.update(&(s.len() as u64).to_le_bytes());
    state.update(s.as_bytes());
}

fn write_encoded<T: Serialize>(state: &mut Xxh3, v: &T) {
    let bytes = postcard::to_allocvec(v).expect("serialization should not fail");
    state.update(&bytes);
}

fn finish(state: Xxh3) -> [u8; 16] {
    state.digest128().to_be_bytes()
}

#[derive(Clone, Copy)]
enum Cursor<'a> {
    Node(&'a DagNode),
    Value(&'a Value),
}

/// Follow temporary references; each hop must go to a lower index.
fn deref_temporaries<'a>(mut node: &'a DagNode, temporaries: &'a [Arc<DagNode>]) -> &'a DagNode {
    let mut bound = temporaries.len();
    loop {
        match node {
            DagNode::Temporary { index, .. } if *index < bound => {
                bound = *index;
                node = &*temporaries[*index];
            }
            _ => return node,
        }
    }
}

fn hash_slot(
    hasher: &DagHasher,
    body: &DagNode,
    temporaries: &[Arc<DagNode>],
    path: &str,
) -> [u8; 16] {
    let segments: Vec<&str> = path.split('.').collect();
    let mut cursor = Cursor::Node(body);
    let mut consumed = 0;

    for seg in &segments {
        let next = match cursor {
            Cursor::Node(node) => match deref_temporaries(node, temporaries) {
                n @ DagNode::Call { .. } => n.argument(seg).map(|a| Cursor::Node(a)),
                DagNode::Constant(v) => v.field(seg).map(Cursor::Value),
                _ => None,
            },
            Cursor::Value(v) => v.field(seg).map(Cursor::Value),
        };
        match next {
            Some(c) => cursor = c,
            None => break,
        }
        consumed += 1;
    }

    let root = match cursor {
        Cursor::Node(n) => hasher.node(n),
        Cursor::Value(v) => hasher.value(v),
    };
    let mut state = Xxh3::new();
    state.update(&root);
    // Whatever could not be walked statically stays part of the identity.
    for seg in &segments[consumed..] {
        write_str(&mut state, seg);
    }
    finish(state)
}

fn simple_name(definition: &str) -> &str {
    let name = definition.split('(').next().unwrap_or(definition);
    name.strip_prefix("mdl").unwrap_or(name).trim_start_matches("::")
}

fn scan_properties(node: &DagNode, props: &mut MaterialProperties) {
    let DagNode::Call {
        definition,
        arguments,
        ..
    } = node
    else {
        return;
    };

    let name = simple_name(definition);
    if name.starts_with("state::transform") {
        *props = props.with_transform();
    }
    if name == "state::object_id" {
        *props = props.with_object_id();
    }

    for (arg_name, arg) in arguments {
        if arg_name == "global_distribution"
            && !matches!(**arg, DagNode::Constant(Value::Bool(false)))
        {
            *props = props.with_global_distribution();
        }
        scan_properties(arg, props);
    }
}
