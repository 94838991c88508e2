use std::sync::Arc;

use ipld_core::ipld::Ipld;

use crate::context::Context;
use crate::error::Error;
use crate::field::FIELD_ITEM_INTERFACE;
use crate::format::FormatSet;
use crate::guard;
use crate::normalizer::{Denormalized, Denormalizer, Handler, Normalizer, NormalizerBase};
use crate::object::{Data, Object};
use crate::serializer::Serializer;
use crate::types::TypeRegistry;

/// Generic handler for field items.
///
/// Normalizes an item to the map of its property values. Denormalizes into
/// the context's target instance, after rejecting string input for
/// serialized columns.
#[derive(Debug, Clone)]
pub struct FieldItemNormalizer {
    base: NormalizerBase,
}

impl FieldItemNormalizer {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        FieldItemNormalizer {
            base: NormalizerBase::new(registry, &FIELD_ITEM_INTERFACE),
        }
    }

    pub fn with_formats(mut self, formats: impl Into<FormatSet>) -> Self {
        self.base = self.base.with_formats(formats);
        self
    }
}

impl Handler for FieldItemNormalizer {
    fn base(&self) -> &NormalizerBase {
        &self.base
    }
}

impl Normalizer for FieldItemNormalizer {
    fn normalize(
        &self,
        object: &dyn Object,
        _format: Option<&str>,
        context: &mut Context<'_>,
        _serializer: &Serializer,
    ) -> Result<Ipld, Error> {
        let item = object.as_field_item().ok_or_else(|| Error::MissingCapability {
            type_name: object.type_info().name().to_string(),
            capability: "field item",
        })?;
        self.base.add_cacheable_dependency(context, Data::Object(object));
        Ok(Ipld::Map(item.values()))
    }
}

impl Denormalizer for FieldItemNormalizer {
    fn denormalize(
        &self,
        data: &Ipld,
        type_name: &str,
        _format: Option<&str>,
        context: &mut Context<'_>,
        _serializer: &Serializer,
    ) -> Result<Denormalized, Error> {
        let item = context.target_instance().ok_or_else(|| Error::MissingTargetInstance {
            type_name: type_name.to_string(),
        })?;

        self.base.check_for_opaque_strings(data, type_name, &*item)?;
        let values = guard::property_values(data, &*item).into_owned();
        item.set_values(values);
        Ok(Denormalized::Populated)
    }
}
