//! Routing execute calls to native entry points.
//!
//! A call runs only when the artifact holds native code, the function index
//! is in range, and the function was registered with exactly the kind the
//! entry point serves. Anything else is rejected without touching native
//! code.

use crate::block::ArgumentBlock;
use crate::function::FunctionKind;
use crate::native::{DfData, NativeCode};
use crate::state::{
    BsdfEvaluateData, BsdfPdfData, BsdfSampleData, ShadingStateEnvironment, ShadingStateMaterial,
    Spectrum,
};
use crate::target_code::TargetCode;

/// Outcome of an execute call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ExecStatus {
    Ok = 0,
    /// The generated function ran and reported failure.
    Failed = -1,
    /// Dispatch preconditions failed; nothing ran.
    Rejected = -2,
}

impl ExecStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_ok(self) -> bool {
        self == ExecStatus::Ok
    }

    fn from_run(succeeded: bool) -> Self {
        if succeeded {
            ExecStatus::Ok
        } else {
            ExecStatus::Failed
        }
    }
}

impl TargetCode {
    /// Run a generic function writing into `result`.
    pub fn execute(
        &self,
        index: usize,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
        result: &mut [u8],
    ) -> ExecStatus {
        let Some((native, args)) = self.prepare(index, FunctionKind::Generic, arguments) else {
            return ExecStatus::Rejected;
        };
        ExecStatus::from_run(native.run_generic(index, result, state, args))
    }

    pub fn execute_environment(
        &self,
        index: usize,
        state: &ShadingStateEnvironment,
        arguments: Option<&ArgumentBlock>,
        result: &mut Spectrum,
    ) -> ExecStatus {
        let Some((native, args)) = self.prepare(index, FunctionKind::Environment, arguments) else {
            return ExecStatus::Rejected;
        };
        ExecStatus::from_run(native.run_environment(index, result, state, args))
    }

    /// Run a distribution function init, filling the state's texture results.
    pub fn execute_bsdf_init(
        &self,
        index: usize,
        state: &mut ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
    ) -> ExecStatus {
        let Some((native, args)) = self.prepare(index, FunctionKind::DfInit, arguments) else {
            return ExecStatus::Rejected;
        };
        ExecStatus::from_run(native.run_init(index, state, args))
    }

    pub fn execute_bsdf_sample(
        &self,
        index: usize,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
        data: &mut BsdfSampleData,
    ) -> ExecStatus {
        self.execute_df(index, state, arguments, DfData::Sample(data))
    }

    pub fn execute_bsdf_evaluate(
        &self,
        index: usize,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
        data: &mut BsdfEvaluateData,
    ) -> ExecStatus {
        self.execute_df(index, state, arguments, DfData::Evaluate(data))
    }

    pub fn execute_bsdf_pdf(
        &self,
        index: usize,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
        data: &mut BsdfPdfData,
    ) -> ExecStatus {
        self.execute_df(index, state, arguments, DfData::Pdf(data))
    }

    fn execute_df(
        &self,
        index: usize,
        state: &ShadingStateMaterial<'_>,
        arguments: Option<&ArgumentBlock>,
        data: DfData<'_>,
    ) -> ExecStatus {
        let Some((native, args)) = self.prepare(index, data.kind(), arguments) else {
            return ExecStatus::Rejected;
        };
        ExecStatus::from_run(native.run_df(index, data, state, args))
    }

    /// Check dispatch preconditions and pick the argument bytes.
    ///
    /// An explicit block wins; otherwise the function's own slot is used if
    /// it has been initialized.
    fn prepare<'s>(
        &'s self,
        index: usize,
        kind: FunctionKind,
        arguments: Option<&'s ArgumentBlock>,
    ) -> Option<(&'s dyn NativeCode, Option<&'s [u8]>)> {
        let Some(native) = self.native.as_deref() else {
            log::trace!("rejected {kind} call to function {index}: no native code");
            return None;
        };
        let Some(function) = self.functions.get(index) else {
            log::trace!("rejected {kind} call: function {index} out of range");
            return None;
        };
        if function.kind() != kind {
            log::trace!(
                "rejected {kind} call to `{}`: registered as {}",
                function.name(),
                function.kind()
            );
            return None;
        }

        let arguments = arguments.map(ArgumentBlock::as_slice).or_else(|| {
            let slot = function.argument_block_index()?;
            self.blocks.get(slot)?.get().map(|block| block.as_slice())
        });
        Some((native, arguments))
    }
}
