//! Guard against writing literal strings into serialized storage columns.
//!
//! A column flagged as serialized stores an encoded blob. A generic handler
//! that copies a string into such a column would either double-encode it or
//! store something the field type cannot decode, so such input is rejected
//! and the field needs a specialized denormalizer.
//!
//! The check needs the field storage schema, which depends on the entity type
//! and bundle. That context only exists once a field item instance is at hand,
//! so it runs inside the conversion body rather than in
//! `supports_denormalization`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use ipld_core::ipld::Ipld;
use log::{trace, warn};

use crate::error::Error;
use crate::field::FieldItem;

/// Entity type setting mapping field names to serialized property names.
pub const SERIALIZED_FIELD_PROPERTY_NAMES: &str = "serialized_field_property_names";

/// Plugin definition entry listing serialized property names.
pub const SERIALIZED_PROPERTY_NAMES: &str = "serialized_property_names";

/// Where the serialized property names of a field item can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializedPropertySource {
    /// `serialized_field_property_names[field]` on the owning entity type.
    EntityType,
    /// `serialized_property_names` on the field type plugin definition.
    PluginDefinition,
    /// Storage columns with `serialize = true`.
    Schema,
}

impl SerializedPropertySource {
    /// Resolution order, highest priority first.
    pub const PRIORITY: [SerializedPropertySource; 3] = [
        SerializedPropertySource::EntityType,
        SerializedPropertySource::PluginDefinition,
        SerializedPropertySource::Schema,
    ];

    /// Property names this source declares for `item`; empty if it declares
    /// none.
    pub fn property_names(self, item: &dyn FieldItem) -> Vec<String> {
        match self {
            SerializedPropertySource::EntityType => {
                let Some(entity_type) = item.entity_type() else {
                    return Vec::new();
                };
                match entity_type.get(SERIALIZED_FIELD_PROPERTY_NAMES) {
                    Some(Ipld::Map(fields)) => fields
                        .get(item.field_definition().name())
                        .and_then(explicit_list)
                        .unwrap_or_default(),
                    _ => Vec::new(),
                }
            }
            SerializedPropertySource::PluginDefinition => item
                .plugin_definition()
                .and_then(|definition| definition.get(SERIALIZED_PROPERTY_NAMES))
                .and_then(explicit_list)
                .unwrap_or_default(),
            SerializedPropertySource::Schema => {
                let schema = item.schema(item.field_definition().storage());
                let Some(columns) = schema.columns else {
                    return Vec::new();
                };
                columns
                    .into_iter()
                    .filter(|(_, column)| column.serialize == Some(true))
                    .map(|(name, _)| name)
                    .collect()
            }
        }
    }
}

fn explicit_list(value: &Ipld) -> Option<Vec<String>> {
    match value {
        Ipld::List(entries) => Some(
            entries
                .iter()
                .filter_map(|entry| match entry {
                    Ipld::String(name) => Some(name.clone()),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Resolves the serialized property names of `item`.
///
/// Sources are tried in [`SerializedPropertySource::PRIORITY`] order and the
/// first non-empty result wins. Returns an empty list if no source declares
/// any, including for schemas without columns.
pub fn serialized_property_names(item: &dyn FieldItem) -> Vec<String> {
    for source in SerializedPropertySource::PRIORITY {
        let names = source.property_names(item);
        if !names.is_empty() {
            trace!(
                "serialized properties of {} from {source:?}: {names:?}",
                item.field_definition().name()
            );
            return names;
        }
    }
    Vec::new()
}

/// Views denormalization input as a property map.
///
/// Non-map input is wrapped under the item's main property. An item without
/// a main property yields an empty map.
pub fn property_values<'d>(
    data: &'d Ipld,
    item: &dyn FieldItem,
) -> Cow<'d, BTreeMap<String, Ipld>> {
    match data {
        Ipld::Map(values) => Cow::Borrowed(values),
        other => {
            let mut values = BTreeMap::new();
            if let Some(main) = item.main_property_name() {
                values.insert(main.to_string(), other.clone());
            }
            Cow::Owned(values)
        }
    }
}

/// Fails if `data` holds a string for any serialized property of `item`.
///
/// `target_class` names the type being denormalized into and is reported in
/// the error, as is the field name (the parent list's name when attached).
pub fn check_for_opaque_strings(
    data: &Ipld,
    target_class: &str,
    item: &dyn FieldItem,
) -> Result<(), Error> {
    let values = property_values(data, item);
    let offending: Vec<String> = serialized_property_names(item)
        .into_iter()
        .filter(|name| matches!(values.get(name), Some(Ipld::String(_))))
        .collect();

    if offending.is_empty() {
        return Ok(());
    }

    let field_name = item
        .parent_name()
        .unwrap_or_else(|| item.name())
        .to_string();
    warn!("rejecting string input for serialized properties {offending:?} of field {field_name}");
    Err(Error::SchemaViolation {
        property_names: offending,
        field_name,
        target_class: target_class.to_string(),
    })
}
