//! Code generator output handed to [`TargetCode::new`](crate::TargetCode::new).

use std::fmt;

use crate::layout::ValueLayout;
use crate::native::NativeCode;
use crate::state::StateUsage;

pub(crate) enum CodeBody {
    Native(Box<dyn NativeCode>),
    Source(String),
}

/// A finished code unit plus what the code generator knows about it.
pub struct GeneratedCode {
    pub(crate) body: CodeBody,
    pub(crate) state_usage: StateUsage,
    pub(crate) layouts: Vec<ValueLayout>,
}

impl GeneratedCode {
    /// Code that can be executed in-process.
    pub fn native(code: impl NativeCode + 'static) -> Self {
        Self::with_body(CodeBody::Native(Box::new(code)))
    }

    /// Source text for an external toolchain; never executed here.
    pub fn source(text: impl Into<String>) -> Self {
        Self::with_body(CodeBody::Source(text.into()))
    }

    fn with_body(body: CodeBody) -> Self {
        Self {
            body,
            state_usage: StateUsage::ALL,
            layouts: Vec::new(),
        }
    }

    pub fn state_usage(mut self, usage: StateUsage) -> Self {
        self.state_usage = usage;
        self
    }

    /// Append the layout of the next argument block slot.
    pub fn layout(mut self, layout: ValueLayout) -> Self {
        self.layouts.push(layout);
        self
    }
}

impl fmt::Debug for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            CodeBody::Native(_) => "native",
            CodeBody::Source(_) => "source",
        };
        f.debug_struct("GeneratedCode")
            .field("body", &body)
            .field("state_usage", &self.state_usage)
            .field("layouts", &self.layouts.len())
            .finish()
    }
}
