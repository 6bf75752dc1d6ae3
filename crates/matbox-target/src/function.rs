//! Callable function catalog entries.

use std::fmt;

/// Native entry-point shape a callable function implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Invalid,
    Generic,
    Environment,
    DfInit,
    DfSample,
    DfEvaluate,
    DfPdf,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FunctionKind::Invalid => "invalid",
            FunctionKind::Generic => "generic",
            FunctionKind::Environment => "environment",
            FunctionKind::DfInit => "df_init",
            FunctionKind::DfSample => "df_sample",
            FunctionKind::DfEvaluate => "df_evaluate",
            FunctionKind::DfPdf => "df_pdf",
        };
        f.write_str(s)
    }
}

/// Source-language flavor of a function prototype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrototypeLanguage {
    Cuda,
    Ptx,
    Hlsl,
    Glsl,
}

impl PrototypeLanguage {
    pub const ALL: [PrototypeLanguage; 4] = [
        PrototypeLanguage::Cuda,
        PrototypeLanguage::Ptx,
        PrototypeLanguage::Hlsl,
        PrototypeLanguage::Glsl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PrototypeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrototypeLanguage::Cuda => "cuda",
            PrototypeLanguage::Ptx => "ptx",
            PrototypeLanguage::Hlsl => "hlsl",
            PrototypeLanguage::Glsl => "glsl",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableFunction {
    name: String,
    kind: FunctionKind,
    prototypes: Vec<Option<String>>,
    argument_block: Option<usize>,
}

impl CallableFunction {
    pub(crate) fn new(name: String, kind: FunctionKind, argument_block: Option<usize>) -> Self {
        Self {
            name,
            kind,
            prototypes: Vec::new(),
            argument_block,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn prototype(&self, language: PrototypeLanguage) -> Option<&str> {
        self.prototypes
            .get(language.index())
            .and_then(|p| p.as_deref())
    }

    /// Argument block slot this function reads when no block is passed explicitly.
    pub fn argument_block_index(&self) -> Option<usize> {
        self.argument_block
    }

    pub(crate) fn set_prototype(&mut self, language: PrototypeLanguage, prototype: String) {
        let index = language.index();
        if index >= self.prototypes.len() {
            self.prototypes.resize(index + 1, None);
        }
        self.prototypes[index] = Some(prototype);
    }
}
