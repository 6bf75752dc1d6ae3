//! In-process executable code units.

use std::sync::Arc;

use matbox_core::{Tag, Transaction};

use crate::function::FunctionKind;
use crate::state::{
    BsdfEvaluateData, BsdfPdfData, BsdfSampleData, Float3, Float4, ShadingStateEnvironment,
    ShadingStateMaterial, Spectrum,
};

/// Renderer hook native code calls for texture and light profile access.
///
/// Resources are addressed by their runtime table index.
pub trait ResourceHandler: Send + Sync {
    fn texture_lookup(&self, texture: u32, coord: Float3) -> Float4;
    fn texture_resolution(&self, texture: u32) -> [u32; 3];
    fn light_profile_power(&self, light_profile: u32) -> f32;
}

/// Handler used when the renderer installs none; every lookup yields zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResourceHandler;

impl ResourceHandler for NullResourceHandler {
    fn texture_lookup(&self, _texture: u32, _coord: Float3) -> Float4 {
        [0.0; 4]
    }

    fn texture_resolution(&self, _texture: u32) -> [u32; 3] {
        [0; 3]
    }

    fn light_profile_power(&self, _light_profile: u32) -> f32 {
        0.0
    }
}

/// Payload of a distribution function call.
#[derive(Debug)]
pub enum DfData<'d> {
    Sample(&'d mut BsdfSampleData),
    Evaluate(&'d mut BsdfEvaluateData),
    Pdf(&'d mut BsdfPdfData),
}

impl DfData<'_> {
    pub fn kind(&self) -> FunctionKind {
        match self {
            DfData::Sample(_) => FunctionKind::DfSample,
            DfData::Evaluate(_) => FunctionKind::DfEvaluate,
            DfData::Pdf(_) => FunctionKind::DfPdf,
        }
    }
}

/// Directly callable generated code.
///
/// Every `run_*` method returns `false` when the generated function itself
/// reports failure. Argument blocks are passed as raw bytes; `None` means the
/// function runs without arguments.
pub trait NativeCode: Send + Sync {
    /// Called once when the owning artifact is finalized.
    fn init(&mut self, transaction: Option<&dyn Transaction>, resources: Arc<dyn ResourceHandler>);

    /// Called once when the owning artifact is dropped.
    fn term(&mut self) {}

    /// Runtime index the unit assigned to the resource behind `tag`, 0 if unknown.
    fn known_resource_index(&self, tag: Tag) -> u32;

    fn run_generic(
        &self,
        index: usize,
        result: &mut [u8],
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool;

    fn run_environment(
        &self,
        index: usize,
        result: &mut Spectrum,
        state: &ShadingStateEnvironment,
        arguments: Option<&[u8]>,
    ) -> bool;

    fn run_init(
        &self,
        index: usize,
        state: &mut ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool;

    fn run_df(
        &self,
        index: usize,
        data: DfData<'_>,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&[u8]>,
    ) -> bool;
}
