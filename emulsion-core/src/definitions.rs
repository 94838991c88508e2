//! Entity type and field type definitions loaded from TOML.
//!
//! ```toml
//! [entity_types.node]
//! serialized_field_property_names = { field_layout = ["section"] }
//!
//! [field_types.map]
//! serialized_property_names = ["value"]
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use ipld_core::ipld::Ipld;
use log::debug;
use serde::Deserialize;

use crate::error::Error;
use crate::field::{EntityType, PluginDefinition};

#[derive(Debug, Default, Deserialize)]
struct RawDefinitions {
    #[serde(default)]
    entity_types: BTreeMap<String, BTreeMap<String, Ipld>>,
    #[serde(default)]
    field_types: BTreeMap<String, BTreeMap<String, Ipld>>,
}

/// Entity type and field type plugin definitions, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entity_types: BTreeMap<String, Arc<EntityType>>,
    field_types: BTreeMap<String, Arc<PluginDefinition>>,
}

impl Definitions {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let raw: RawDefinitions = toml::from_str(source)?;
        debug!(
            "loaded {} entity types and {} field types",
            raw.entity_types.len(),
            raw.field_types.len()
        );

        Ok(Definitions {
            entity_types: raw
                .entity_types
                .into_iter()
                .map(|(id, settings)| {
                    let entity_type = EntityType::with_settings(id.clone(), settings);
                    (id, Arc::new(entity_type))
                })
                .collect(),
            field_types: raw
                .field_types
                .into_iter()
                .map(|(id, definition)| {
                    let plugin = PluginDefinition::with_definition(id.clone(), definition);
                    (id, Arc::new(plugin))
                })
                .collect(),
        })
    }

    pub fn entity_type(&self, id: &str) -> Option<&Arc<EntityType>> {
        self.entity_types.get(id)
    }

    pub fn field_type(&self, id: &str) -> Option<&Arc<PluginDefinition>> {
        self.field_types.get(id)
    }

    pub fn entity_type_ids(&self) -> impl Iterator<Item = &str> {
        self.entity_types.keys().map(String::as_str)
    }

    pub fn field_type_ids(&self) -> impl Iterator<Item = &str> {
        self.field_types.keys().map(String::as_str)
    }
}

impl FromStr for Definitions {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Definitions::from_toml(source)
    }
}
