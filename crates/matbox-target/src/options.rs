use std::fmt;
use std::sync::Arc;

use crate::layout::StringMode;
use crate::native::{NullResourceHandler, ResourceHandler};

/// Configuration of a target code artifact.
///
/// ```
/// use matbox_target::{StringMode, TargetCodeOptions};
///
/// let options = TargetCodeOptions::new().string_mode(StringMode::Mapped);
/// assert_eq!(options.strings(), StringMode::Mapped);
/// ```
#[derive(Clone, Default)]
pub struct TargetCodeOptions {
    strings: StringMode,
    resource_handler: Option<Arc<dyn ResourceHandler>>,
}

impl TargetCodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string_mode(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    /// Hook installed into native code at finalize.
    pub fn resource_handler(mut self, handler: Arc<dyn ResourceHandler>) -> Self {
        self.resource_handler = Some(handler);
        self
    }

    pub fn strings(&self) -> StringMode {
        self.strings
    }

    pub fn handler(&self) -> Arc<dyn ResourceHandler> {
        match &self.resource_handler {
            Some(h) => h.clone(),
            None => Arc::new(NullResourceHandler),
        }
    }
}

impl fmt::Debug for TargetCodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetCodeOptions")
            .field("strings", &self.strings)
            .field("resource_handler", &self.resource_handler.is_some())
            .finish()
    }
}
