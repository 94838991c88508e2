use std::sync::Arc;

use ipld_core::ipld::Ipld;

use crate::cache;
use crate::context::Context;
use crate::error::Error;
use crate::field::FieldItem;
use crate::format::{self, FormatSet};
use crate::guard;
use crate::object::{Data, Object};
use crate::serializer::Serializer;
use crate::types::{SupportedTypeSet, TypeRegistry};

/// Shared state and checks of every handler.
///
/// Concrete handlers embed a `NormalizerBase` and expose it through
/// [`Handler::base`]; the eligibility predicates of [`Normalizer`] and
/// [`Denormalizer`] delegate to it.
#[derive(Debug, Clone)]
pub struct NormalizerBase {
    supported: SupportedTypeSet,
    formats: Option<FormatSet>,
    registry: Arc<TypeRegistry>,
}

impl NormalizerBase {
    /// Creates a base accepting every format.
    pub fn new(registry: Arc<TypeRegistry>, supported: impl Into<SupportedTypeSet>) -> Self {
        NormalizerBase {
            supported: supported.into(),
            formats: None,
            registry,
        }
    }

    /// Restricts the handler to the given formats.
    pub fn with_formats(mut self, formats: impl Into<FormatSet>) -> Self {
        self.formats = Some(formats.into());
        self
    }

    pub fn supported(&self) -> &SupportedTypeSet {
        &self.supported
    }

    pub fn formats(&self) -> Option<&FormatSet> {
        self.formats.as_ref()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// True if `data` is an object of a supported type and `format` is
    /// accepted.
    pub fn supports_normalization(&self, data: Data<'_>, format: Option<&str>) -> bool {
        if !data.is_object() || !self.check_format(format) {
            return false;
        }
        self.supported.matches_instance(data)
    }

    /// True if `type_name` is, or derives from, a supported type and `format`
    /// is accepted. The input data does not take part in the decision.
    pub fn supports_denormalization(
        &self,
        _data: &Ipld,
        type_name: &str,
        format: Option<&str>,
    ) -> bool {
        if !self.check_format(format) {
            return false;
        }
        self.supported.matches_type_name(&self.registry, type_name)
    }

    pub fn check_format(&self, format: Option<&str>) -> bool {
        format::check_format(self.formats.as_ref(), format)
    }

    /// Adds the cacheability of `data` to the context's sink, if both exist.
    pub fn add_cacheable_dependency(&self, context: &mut Context<'_>, data: Data<'_>) {
        cache::record_if_cacheable(context, data);
    }

    /// Rejects string input for serialized columns of `item`.
    pub fn check_for_opaque_strings(
        &self,
        data: &Ipld,
        target_class: &str,
        item: &dyn FieldItem,
    ) -> Result<(), Error> {
        guard::check_for_opaque_strings(data, target_class, item)
    }
}

/// Access to the embedded [`NormalizerBase`].
pub trait Handler: Send + Sync {
    fn base(&self) -> &NormalizerBase;
}

/// Converts objects into the generic representation.
pub trait Normalizer: Handler {
    fn supports_normalization(&self, data: Data<'_>, format: Option<&str>) -> bool {
        self.base().supports_normalization(data, format)
    }

    /// Normalizes `object`. Nested values go back through `serializer` with
    /// the same `context`.
    fn normalize(
        &self,
        object: &dyn Object,
        format: Option<&str>,
        context: &mut Context<'_>,
        serializer: &Serializer,
    ) -> Result<Ipld, Error>;
}

/// Outcome of a denormalization.
#[derive(Debug)]
pub enum Denormalized {
    /// A newly constructed value.
    Created(Box<dyn Object>),
    /// The context's target instance was populated in place.
    Populated,
}

/// Reconstructs objects from the generic representation.
pub trait Denormalizer: Handler {
    fn supports_denormalization(&self, data: &Ipld, type_name: &str, format: Option<&str>) -> bool {
        self.base().supports_denormalization(data, type_name, format)
    }

    fn denormalize(
        &self,
        data: &Ipld,
        type_name: &str,
        format: Option<&str>,
        context: &mut Context<'_>,
        serializer: &Serializer,
    ) -> Result<Denormalized, Error>;
}
