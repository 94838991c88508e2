use std::sync::Arc;

use ipld_core::ipld::Ipld;
use log::{debug, trace};

use crate::context::Context;
use crate::error::Error;
use crate::normalizer::{Denormalized, Denormalizer, Normalizer};
use crate::object::Data;

/// Ordered registry of handlers that dispatches each request to the first
/// handler declaring support for it.
///
/// Handlers recurse through the serializer for nested values, threading the
/// same [`Context`] through the whole call tree.
#[derive(Default)]
pub struct Serializer {
    normalizers: Vec<Arc<dyn Normalizer>>,
    denormalizers: Vec<Arc<dyn Denormalizer>>,
}

impl Serializer {
    pub fn builder() -> SerializerBuilder {
        SerializerBuilder::default()
    }

    /// Returns the first normalizer supporting `data` in `format`.
    pub fn normalizer_for(&self, data: Data<'_>, format: Option<&str>) -> Option<&dyn Normalizer> {
        self.normalizers
            .iter()
            .find(|n| n.supports_normalization(data, format))
            .map(|n| n.as_ref())
    }

    /// Returns the first denormalizer supporting `type_name` in `format`.
    pub fn denormalizer_for(
        &self,
        data: &Ipld,
        type_name: &str,
        format: Option<&str>,
    ) -> Option<&dyn Denormalizer> {
        self.denormalizers
            .iter()
            .find(|d| d.supports_denormalization(data, type_name, format))
            .map(|d| d.as_ref())
    }

    pub fn supports_normalization(&self, data: Data<'_>, format: Option<&str>) -> bool {
        self.normalizer_for(data, format).is_some()
    }

    pub fn supports_denormalization(
        &self,
        data: &Ipld,
        type_name: &str,
        format: Option<&str>,
    ) -> bool {
        self.denormalizer_for(data, type_name, format).is_some()
    }

    /// Normalizes `data`. Generic values pass through unchanged.
    pub fn normalize(
        &self,
        data: Data<'_>,
        format: Option<&str>,
        context: &mut Context<'_>,
    ) -> Result<Ipld, Error> {
        let object = match data {
            Data::Value(value) => return Ok(value.clone()),
            Data::Object(object) => object,
        };

        let Some(normalizer) = self.normalizer_for(data, format) else {
            debug!("no normalizer for {} (format {format:?})", data.type_name());
            return Err(Error::NoNormalizer {
                type_name: data.type_name().to_string(),
                format: format.map(str::to_string),
            });
        };

        trace!("normalizing {} (format {format:?})", data.type_name());
        normalizer.normalize(object, format, context, self)
    }

    /// Denormalizes `data` into `type_name`.
    pub fn denormalize(
        &self,
        data: &Ipld,
        type_name: &str,
        format: Option<&str>,
        context: &mut Context<'_>,
    ) -> Result<Denormalized, Error> {
        let Some(denormalizer) = self.denormalizer_for(data, type_name, format) else {
            debug!("no denormalizer for {type_name} (format {format:?})");
            return Err(Error::NoDenormalizer {
                type_name: type_name.to_string(),
                format: format.map(str::to_string),
            });
        };

        trace!("denormalizing into {type_name} (format {format:?})");
        denormalizer.denormalize(data, type_name, format, context, self)
    }

    pub fn normalizer_count(&self) -> usize {
        self.normalizers.len()
    }

    pub fn denormalizer_count(&self) -> usize {
        self.denormalizers.len()
    }
}

/// Builds a [`Serializer`]. Registration order is dispatch order.
#[derive(Default)]
pub struct SerializerBuilder {
    normalizers: Vec<Arc<dyn Normalizer>>,
    denormalizers: Vec<Arc<dyn Denormalizer>>,
}

impl SerializerBuilder {
    pub fn normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    pub fn denormalizer(mut self, denormalizer: Arc<dyn Denormalizer>) -> Self {
        self.denormalizers.push(denormalizer);
        self
    }

    /// Registers a handler in both roles.
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Normalizer + Denormalizer + 'static,
    {
        let handler = Arc::new(handler);
        self.normalizers.push(handler.clone());
        self.denormalizers.push(handler);
        self
    }

    pub fn build(self) -> Serializer {
        Serializer {
            normalizers: self.normalizers,
            denormalizers: self.denormalizers,
        }
    }
}
