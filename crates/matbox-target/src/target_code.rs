//! The target code artifact.
//!
//! Everything except the argument block slots is written while the artifact
//! is being assembled (`&mut self`) and only read afterwards. Slots are
//! populated lazily through `&self`, at most once each, so a finalized
//! artifact can be shared across render threads behind an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use matbox_core::{ResourceKind, TextureShape, Transaction, Value, ValueList};
use matbox_material::CompiledMaterial;

use crate::block::ArgumentBlock;
use crate::error::{PackError, TargetCodeError};
use crate::function::{CallableFunction, FunctionKind, PrototypeLanguage};
use crate::generated::{CodeBody, GeneratedCode};
use crate::layout::{StringMode, ValueLayout};
use crate::native::NativeCode;
use crate::options::TargetCodeOptions;
use crate::pack::pack_unchecked;
use crate::resolver::{ResourceResolver, TransactionResolver};
use crate::state::StateUsage;
use crate::tables::{ResourceTable, TextureEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeSegment {
    pub code: String,
    pub description: String,
}

/// Read-only data referenced by generated code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSegment {
    name: String,
    data: Box<[u8]>,
}

impl DataSegment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub struct TargetCode {
    options: TargetCodeOptions,
    pub(crate) native: Option<Box<dyn NativeCode>>,
    source: String,
    code_segments: Vec<CodeSegment>,
    pub(crate) functions: Vec<CallableFunction>,
    function_map: HashMap<String, usize>,
    textures: ResourceTable<TextureEntry>,
    light_profiles: ResourceTable<String>,
    bsdf_measurements: ResourceTable<String>,
    string_constants: ResourceTable<String>,
    data_segments: Vec<DataSegment>,
    layouts: Vec<Arc<ValueLayout>>,
    pub(crate) blocks: Vec<OnceLock<Arc<ArgumentBlock>>>,
    render_state_usage: StateUsage,
}

impl TargetCode {
    /// Finalize generator output into an artifact.
    ///
    /// Layouts must use the string mode of `options`. Native code is
    /// initialized last, once every layout has been accepted.
    pub fn new(
        code: GeneratedCode,
        transaction: Option<&dyn Transaction>,
        options: TargetCodeOptions,
    ) -> Result<Self, TargetCodeError> {
        let GeneratedCode {
            body,
            state_usage,
            layouts,
        } = code;

        let mut target = Self::for_linking(options);
        for layout in layouts {
            target.add_argument_block_layout(layout)?;
        }
        target.render_state_usage = state_usage;

        match body {
            CodeBody::Native(mut native) => {
                native.init(transaction, target.options.handler());
                log::debug!(
                    "finalized native target code: {} argument block layouts",
                    target.layouts.len()
                );
                target.native = Some(native);
            }
            CodeBody::Source(text) => {
                log::debug!(
                    "finalized target code: {} bytes of source, {} argument block layouts",
                    text.len(),
                    target.layouts.len()
                );
                target.source = text;
            }
        }
        Ok(target)
    }

    /// Empty artifact to be filled by a linker.
    pub fn for_linking(options: TargetCodeOptions) -> Self {
        Self {
            options,
            native: None,
            source: String::new(),
            code_segments: Vec::new(),
            functions: Vec::new(),
            function_map: HashMap::new(),
            textures: ResourceTable::new(),
            light_profiles: ResourceTable::new(),
            bsdf_measurements: ResourceTable::new(),
            string_constants: ResourceTable::new(),
            data_segments: Vec::new(),
            layouts: Vec::new(),
            blocks: Vec::new(),
            render_state_usage: StateUsage::ALL,
        }
    }

    pub fn options(&self) -> &TargetCodeOptions {
        &self.options
    }

    pub fn string_mode(&self) -> StringMode {
        self.options.strings()
    }

    pub fn is_native(&self) -> bool {
        self.native.is_some()
    }

    /// Source text; empty for native code.
    pub fn code(&self) -> &str {
        &self.source
    }

    pub fn code_size(&self) -> usize {
        self.source.len()
    }

    pub fn render_state_usage(&self) -> StateUsage {
        self.render_state_usage
    }

    // Code and data segments

    pub fn add_code_segment(&mut self, code: impl Into<String>, description: impl Into<String>) {
        self.code_segments.push(CodeSegment {
            code: code.into(),
            description: description.into(),
        });
    }

    pub fn code_segment_count(&self) -> usize {
        self.code_segments.len()
    }

    pub fn code_segment(&self, index: usize) -> Option<&CodeSegment> {
        self.code_segments.get(index)
    }

    /// Copy `data` into a new read-only segment and return its index.
    pub fn add_ro_segment(&mut self, name: impl Into<String>, data: &[u8]) -> usize {
        self.data_segments.push(DataSegment {
            name: name.into(),
            data: data.into(),
        });
        self.data_segments.len() - 1
    }

    pub fn ro_data_segment_count(&self) -> usize {
        self.data_segments.len()
    }

    pub fn ro_data_segment(&self, index: usize) -> Option<&DataSegment> {
        self.data_segments.get(index)
    }

    // Callable functions

    /// Register a function; re-registering a name returns the existing index
    /// and leaves its entry untouched.
    pub fn add_function(
        &mut self,
        name: impl Into<String>,
        kind: FunctionKind,
        argument_block: Option<usize>,
    ) -> usize {
        let name = name.into();
        if let Some(&index) = self.function_map.get(&name) {
            return index;
        }
        let index = self.functions.len();
        log::debug!("callable function {index}: `{name}` ({kind})");
        self.function_map.insert(name.clone(), index);
        self.functions
            .push(CallableFunction::new(name, kind, argument_block));
        index
    }

    pub fn set_function_prototype(
        &mut self,
        index: usize,
        language: PrototypeLanguage,
        prototype: impl Into<String>,
    ) -> Result<(), TargetCodeError> {
        let count = self.functions.len();
        let function = self
            .functions
            .get_mut(index)
            .ok_or(TargetCodeError::NoSuchFunction { index, count })?;
        function.set_prototype(language, prototype.into());
        Ok(())
    }

    pub fn callable_function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn callable_function(&self, index: usize) -> Option<&CallableFunction> {
        self.functions.get(index)
    }

    pub fn callable_function_index(&self, name: &str) -> Option<usize> {
        self.function_map.get(name).copied()
    }

    pub fn callable_function_name(&self, index: usize) -> Option<&str> {
        self.functions.get(index).map(|f| f.name())
    }

    /// Kind of function `index`, [`FunctionKind::Invalid`] when out of range.
    pub fn callable_function_kind(&self, index: usize) -> FunctionKind {
        self.functions
            .get(index)
            .map_or(FunctionKind::Invalid, |f| f.kind())
    }

    pub fn callable_function_prototype(
        &self,
        index: usize,
        language: PrototypeLanguage,
    ) -> Option<&str> {
        self.functions.get(index)?.prototype(language)
    }

    pub fn callable_function_argument_block_index(&self, index: usize) -> Option<usize> {
        self.functions.get(index)?.argument_block_index()
    }

    // Resource and string tables

    pub fn add_texture_index(&mut self, index: usize, name: impl Into<String>, shape: TextureShape) {
        self.textures.register(index, TextureEntry::new(name, shape));
    }

    pub fn add_light_profile_index(&mut self, index: usize, name: impl Into<String>) {
        self.light_profiles.register(index, name.into());
    }

    pub fn add_bsdf_measurement_index(&mut self, index: usize, name: impl Into<String>) {
        self.bsdf_measurements.register(index, name.into());
    }

    pub fn add_string_constant_index(&mut self, index: usize, value: impl Into<String>) {
        self.string_constants.register(index, value.into());
    }

    pub fn textures(&self) -> &ResourceTable<TextureEntry> {
        &self.textures
    }

    pub fn light_profiles(&self) -> &ResourceTable<String> {
        &self.light_profiles
    }

    pub fn bsdf_measurements(&self) -> &ResourceTable<String> {
        &self.bsdf_measurements
    }

    pub fn string_constants(&self) -> &ResourceTable<String> {
        &self.string_constants
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn texture(&self, index: usize) -> Option<&str> {
        self.textures.name(index)
    }

    /// Shape of texture `index`, [`TextureShape::Invalid`] when out of range.
    pub fn texture_shape(&self, index: usize) -> TextureShape {
        self.textures
            .get(index)
            .map_or(TextureShape::Invalid, |t| t.shape)
    }

    pub fn light_profile_count(&self) -> usize {
        self.light_profiles.len()
    }

    pub fn light_profile(&self, index: usize) -> Option<&str> {
        self.light_profiles.name(index)
    }

    pub fn bsdf_measurement_count(&self) -> usize {
        self.bsdf_measurements.len()
    }

    pub fn bsdf_measurement(&self, index: usize) -> Option<&str> {
        self.bsdf_measurements.name(index)
    }

    pub fn string_constant_count(&self) -> usize {
        self.string_constants.len()
    }

    pub fn string_constant(&self, index: usize) -> Option<&str> {
        self.string_constants.name(index)
    }

    /// Index of `s` in the string constant table, 0 if absent.
    pub fn string_index(&self, s: &str) -> u32 {
        self.string_constants.index_of(s)
    }

    /// Runtime index of the resource `value` references, 0 if unknown.
    ///
    /// Native code answers from its own tables. Otherwise the tag is named
    /// through `transaction` and the name looked up in the table matching
    /// the value's kind.
    pub fn known_resource_index(&self, transaction: Option<&dyn Transaction>, value: &Value) -> u32 {
        let Some((kind, resource)) = value.as_resource() else {
            log::debug!("resource index requested for a {} value", value.ty());
            return 0;
        };
        let Some(transaction) = transaction else {
            return 0;
        };
        if !resource.tag.is_valid() {
            return 0;
        }
        if let Some(native) = &self.native {
            return native.known_resource_index(resource.tag);
        }
        let Some(name) = transaction.tag_to_name(resource.tag) else {
            return 0;
        };
        match kind {
            ResourceKind::Texture => self.textures.index_of(name),
            ResourceKind::LightProfile => self.light_profiles.index_of(name),
            ResourceKind::BsdfMeasurement => self.bsdf_measurements.index_of(name),
        }
    }

    // Argument blocks

    /// Append a layout with an empty slot and return the slot index.
    pub fn add_argument_block_layout(&mut self, layout: ValueLayout) -> Result<usize, TargetCodeError> {
        if layout.string_mode() != self.options.strings() {
            return Err(TargetCodeError::StringModeMismatch {
                code: self.options.strings(),
                layout: layout.string_mode(),
            });
        }
        self.layouts.push(Arc::new(layout));
        self.blocks.push(OnceLock::new());
        Ok(self.layouts.len() - 1)
    }

    pub fn argument_block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn argument_block_layout_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn argument_block_layout(&self, index: usize) -> Option<Arc<ValueLayout>> {
        self.layouts.get(index).cloned()
    }

    /// Packed block of slot `index`, if it has been initialized.
    pub fn argument_block(&self, index: usize) -> Option<Arc<ArgumentBlock>> {
        self.blocks.get(index)?.get().cloned()
    }

    /// Populate slot `index` from `arguments` unless it already holds a block.
    ///
    /// Concurrent callers on the same slot pack at most once; everyone gets
    /// the published block. A populated slot is returned as is, whatever
    /// `arguments` contains.
    pub fn init_argument_block(
        &self,
        index: usize,
        transaction: Option<&dyn Transaction>,
        arguments: &ValueList,
    ) -> Result<Arc<ArgumentBlock>, TargetCodeError> {
        let slot = self.blocks.get(index).ok_or(TargetCodeError::NoSuchSlot {
            index,
            count: self.blocks.len(),
        })?;
        if let Some(block) = slot.get() {
            return Ok(block.clone());
        }

        let layout = &self.layouts[index];
        if arguments.len() != layout.num_elements() {
            return Err(PackError::ArgumentCountMismatch {
                expected: layout.num_elements(),
                actual: arguments.len(),
            }
            .into());
        }

        let resolver = TransactionResolver::new(self, transaction);
        let block = slot.get_or_init(|| {
            log::debug!("packing argument block {index} ({} bytes)", layout.size());
            Arc::new(pack_unchecked(layout, arguments, &resolver))
        });
        Ok(block.clone())
    }

    /// Pack the arguments of `material` with the layout of slot `index`
    /// into a caller-owned block. The slot itself is not touched.
    pub fn create_argument_block(
        &self,
        index: usize,
        material: &CompiledMaterial,
        resolver: &dyn ResourceResolver,
    ) -> Option<ArgumentBlock> {
        let layout = self.layouts.get(index)?;
        let arguments = material.arguments();
        if arguments.len() != layout.num_elements() {
            log::debug!(
                "material {} has {} arguments, layout {index} expects {}",
                material.hash(),
                arguments.len(),
                layout.num_elements()
            );
            return None;
        }
        Some(pack_unchecked(layout, &arguments, resolver))
    }
}

impl Drop for TargetCode {
    fn drop(&mut self) {
        if let Some(native) = &mut self.native {
            native.term();
        }
    }
}
