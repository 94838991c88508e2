use log::trace;

use crate::context::Context;
use crate::object::Data;

/// How long a cached result derived from a value stays valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaxAge {
    /// Valid until explicitly invalidated through a tag.
    #[default]
    Permanent,
    Seconds(u32),
}

impl MaxAge {
    /// Combines two max-ages, keeping the shorter one.
    pub fn merge(self, other: MaxAge) -> MaxAge {
        match (self, other) {
            (MaxAge::Permanent, other) | (other, MaxAge::Permanent) => other,
            (MaxAge::Seconds(a), MaxAge::Seconds(b)) => MaxAge::Seconds(a.min(b)),
        }
    }
}

/// Metadata describing what invalidates a cached result derived from a value.
pub trait CacheableDependency {
    fn cache_tags(&self) -> &[String];

    fn cache_contexts(&self) -> &[String];

    fn cache_max_age(&self) -> MaxAge {
        MaxAge::Permanent
    }
}

/// Accumulates cacheable dependencies encountered during one call tree.
pub trait CacheabilitySink {
    fn add_cacheable_dependency(&mut self, dependency: &dyn CacheableDependency);
}

/// The stock sink: merged tags and contexts plus the shortest max-age.
///
/// Tags and contexts keep first-seen order and are never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheableMetadata {
    tags: Vec<String>,
    contexts: Vec<String>,
    max_age: MaxAge,
}

impl CacheableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    pub fn max_age(&self) -> MaxAge {
        self.max_age
    }
}

fn merge_unique(into: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

impl CacheabilitySink for CacheableMetadata {
    fn add_cacheable_dependency(&mut self, dependency: &dyn CacheableDependency) {
        merge_unique(&mut self.tags, dependency.cache_tags());
        merge_unique(&mut self.contexts, dependency.cache_contexts());
        self.max_age = self.max_age.merge(dependency.cache_max_age());
    }
}

impl CacheableDependency for CacheableMetadata {
    fn cache_tags(&self) -> &[String] {
        &self.tags
    }

    fn cache_contexts(&self) -> &[String] {
        &self.contexts
    }

    fn cache_max_age(&self) -> MaxAge {
        self.max_age
    }
}

/// Forwards `data` to the context's sink if it is a cacheable object.
///
/// Does nothing for primitive values, non-cacheable objects, or a context
/// without a sink, so it can be called on every value encountered.
pub fn record_if_cacheable(context: &mut Context<'_>, data: Data<'_>) {
    let Some(object) = data.as_object() else {
        return;
    };
    let Some(dependency) = object.as_cacheable() else {
        return;
    };
    if let Some(sink) = context.cacheability() {
        trace!(
            "adding cacheable dependency from {}",
            object.type_info().name()
        );
        sink.add_cacheable_dependency(dependency);
    }
}
