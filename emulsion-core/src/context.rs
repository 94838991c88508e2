use std::fmt;

use crate::cache::CacheabilitySink;
use crate::field::FieldItem;

/// Options for one top-level (de)normalization call.
///
/// Created by the caller, threaded by `&mut` through every nested handler
/// invocation, and dropped when the call returns. Borrowed collaborators never
/// outlive the call.
#[derive(Default)]
pub struct Context<'a> {
    cacheability: Option<&'a mut dyn CacheabilitySink>,
    target_type: Option<String>,
    target_instance: Option<&'a mut dyn FieldItem>,
}

impl<'a> Context<'a> {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects cacheable dependencies of every normalized value into `sink`.
    pub fn with_cacheability(mut self, sink: &'a mut dyn CacheabilitySink) -> Self {
        self.cacheability = Some(sink);
        self
    }

    /// Hints the type handlers should produce when denormalizing.
    pub fn with_target_type(mut self, type_name: impl Into<String>) -> Self {
        self.target_type = Some(type_name.into());
        self
    }

    /// Field item to populate in place when denormalizing.
    pub fn with_target_instance(mut self, item: &'a mut dyn FieldItem) -> Self {
        self.target_instance = Some(item);
        self
    }

    pub fn cacheability(&mut self) -> Option<&mut (dyn CacheabilitySink + 'a)> {
        self.cacheability.as_deref_mut()
    }

    pub fn has_cacheability(&self) -> bool {
        self.cacheability.is_some()
    }

    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    pub fn target_instance(&mut self) -> Option<&mut (dyn FieldItem + 'a)> {
        self.target_instance.as_deref_mut()
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("cacheability", &self.cacheability.is_some())
            .field("target_type", &self.target_type)
            .field("target_instance", &self.target_instance.as_deref())
            .finish()
    }
}
