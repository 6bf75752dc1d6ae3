use std::iter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use matbox_core::{MemoryTransaction, Tag, Transaction, TypeFactory, Value};
use matbox_material::{CompiledMaterial, DagNode, InstanceBuilder, UnitContext};

use crate::native::{DfData, NativeCode, ResourceHandler};
use crate::resolver::ResourceResolver;
use crate::state::{ShadingStateEnvironment, ShadingStateMaterial, Spectrum};

/// Store wrapper counting name lookups.
pub struct CountingTransaction {
    inner: MemoryTransaction,
    lookups: AtomicUsize,
}

impl CountingTransaction {
    pub fn new(inner: MemoryTransaction) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Transaction for CountingTransaction {
    fn tag_to_name(&self, tag: Tag) -> Option<&str> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.tag_to_name(tag)
    }
}

/// Resolves every resource to 7 and every string to its length.
pub struct StubResolver;

impl ResourceResolver for StubResolver {
    fn resource_index(&self, _resource: &Value) -> u32 {
        7
    }

    fn string_index(&self, s: &str) -> u32 {
        s.len() as u32
    }
}

/// What a [`MockNative`] observed.
#[derive(Default)]
pub struct Probe {
    pub inits: AtomicUsize,
    pub terms: AtomicUsize,
    pub runs: AtomicUsize,
    pub last_arguments: Mutex<Option<Vec<u8>>>,
}

impl Probe {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn last_arguments(&self) -> Option<Vec<u8>> {
        self.last_arguments.lock().unwrap().clone()
    }
}

pub struct MockNative {
    pub probe: Arc<Probe>,
    pub succeed: bool,
}

impl MockNative {
    pub fn new(succeed: bool) -> (Self, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (
            Self {
                probe: probe.clone(),
                succeed,
            },
            probe,
        )
    }

    fn record(&self, arguments: Option<&[u8]>) -> bool {
        self.probe.runs.fetch_add(1, Ordering::SeqCst);
        *self.probe.last_arguments.lock().unwrap() = arguments.map(<[u8]>::to_vec);
        self.succeed
    }
}

impl NativeCode for MockNative {
    fn init(&mut self, _transaction: Option<&dyn Transaction>, _resources: Arc<dyn ResourceHandler>) {
        self.probe.inits.fetch_add(1, Ordering::SeqCst);
    }

    fn term(&mut self) {
        self.probe.terms.fetch_add(1, Ordering::SeqCst);
    }

    fn known_resource_index(&self, tag: Tag) -> u32 {
        tag.get() + 100
    }

    fn run_generic(
        &self,
        _index: usize,
        result: &mut [u8],
        _state: &ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool {
        result.fill(0xab);
        self.record(arguments)
    }

    fn run_environment(
        &self,
        _index: usize,
        result: &mut Spectrum,
        _state: &ShadingStateEnvironment,
        arguments: Option<&[u8]>,
    ) -> bool {
        *result = [1.0; 3];
        self.record(arguments)
    }

    fn run_init(
        &self,
        _index: usize,
        state: &mut ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool {
        if let Some(first) = state.text_results.first_mut() {
            *first = [1.0; 4];
        }
        self.record(arguments)
    }

    fn run_df(
        &self,
        _index: usize,
        data: DfData<'_>,
        _state: &ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool {
        match data {
            DfData::Sample(d) => d.pdf = 1.0,
            DfData::Evaluate(d) => d.pdf = 2.0,
            DfData::Pdf(d) => d.pdf = 3.0,
        }
        self.record(arguments)
    }
}

pub fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_ne_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

pub fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Compiled material with an empty body and the given defaults.
pub fn compiled_material<'a>(parameters: impl IntoIterator<Item = (&'a str, Value)>) -> CompiledMaterial {
    let tf = TypeFactory::new();
    let body = DagNode::call("material", tf.material(), iter::empty::<(&str, Arc<DagNode>)>());
    let builder = parameters
        .into_iter()
        .fold(InstanceBuilder::new().body(body), |b, (name, value)| {
            b.parameter(name, value)
        });
    CompiledMaterial::from_instance(&builder.build(), UnitContext::new())
}
