//! The slice of the entity/field model that handlers and the serialized column
//! guard consume.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use ipld_core::ipld::Ipld;
use serde::Deserialize;

use crate::object::Object;
use crate::types::TypeInfo;

/// Descriptor of the field item interface. Generic field handlers declare
/// support for it.
pub static FIELD_ITEM_INTERFACE: TypeInfo = TypeInfo::new("FieldItemInterface", &[]);

/// Descriptor of the field item list interface.
pub static FIELD_ITEM_LIST_INTERFACE: TypeInfo = TypeInfo::new("FieldItemListInterface", &[]);

/// One value of a field, e.g. a single text item or a single map item.
pub trait FieldItem: Object {
    /// The item's own name within its list (usually its delta).
    fn name(&self) -> &str;

    /// Name of the field item list this item belongs to, if attached.
    fn parent_name(&self) -> Option<&str> {
        None
    }

    /// Property that receives scalar input, from the item's data definition.
    fn main_property_name(&self) -> Option<&str>;

    fn field_definition(&self) -> &FieldDefinition;

    /// Storage schema of this field type for the given storage definition.
    fn schema(&self, storage: &FieldStorageDefinition) -> FieldSchema;

    /// Type of the entity owning this item, if attached to one.
    fn entity_type(&self) -> Option<&EntityType> {
        None
    }

    /// Field type plugin definition, for items that expose plugin metadata.
    fn plugin_definition(&self) -> Option<&PluginDefinition> {
        None
    }

    /// Current property values.
    fn values(&self) -> BTreeMap<String, Ipld>;

    /// Replaces the property values.
    fn set_values(&mut self, values: BTreeMap<String, Ipld>);
}

/// A list of field items forming one field of an entity.
pub trait FieldItemList: Object {
    fn name(&self) -> &str;

    fn items(&self) -> Vec<&dyn Object>;
}

/// Storage-level definition of a field, shared by all bundles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldStorageDefinition {
    pub name: String,
    /// Field type plugin id, e.g. `string` or `map`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub settings: BTreeMap<String, Ipld>,
}

impl FieldStorageDefinition {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        FieldStorageDefinition {
            name: name.into(),
            field_type: field_type.into(),
            settings: BTreeMap::new(),
        }
    }
}

/// Bundle-level field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    name: String,
    storage: FieldStorageDefinition,
}

impl FieldDefinition {
    pub fn new(storage: FieldStorageDefinition) -> Self {
        FieldDefinition {
            name: storage.name.clone(),
            storage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> &FieldStorageDefinition {
        &self.storage
    }
}

/// Storage schema of a field type. `columns` is absent for computed fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub columns: Option<IndexMap<String, ColumnSchema>>,
}

impl FieldSchema {
    /// A schema with the given columns, in order.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnSchema)>,
        S: Into<String>,
    {
        FieldSchema {
            columns: Some(
                columns
                    .into_iter()
                    .map(|(name, column)| (name.into(), column))
                    .collect(),
            ),
        }
    }
}

/// Schema of one storage column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSchema {
    #[serde(rename = "type")]
    pub column_type: String,
    /// The column stores an encoded blob rather than a literal value.
    #[serde(default)]
    pub serialize: Option<bool>,
    #[serde(default)]
    pub not_null: bool,
}

impl ColumnSchema {
    pub fn new(column_type: impl Into<String>) -> Self {
        ColumnSchema {
            column_type: column_type.into(),
            serialize: None,
            not_null: false,
        }
    }

    pub fn serialized(mut self) -> Self {
        self.serialize = Some(true);
        self
    }
}

/// An entity type definition with free-form settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityType {
    id: String,
    settings: BTreeMap<String, Ipld>,
}

impl EntityType {
    pub fn new(id: impl Into<String>) -> Self {
        EntityType {
            id: id.into(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with_settings(id: impl Into<String>, settings: BTreeMap<String, Ipld>) -> Self {
        EntityType {
            id: id.into(),
            settings,
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Ipld) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Ipld> {
        self.settings.get(key)
    }
}

/// A field type plugin definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginDefinition {
    id: String,
    definition: BTreeMap<String, Ipld>,
}

impl PluginDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        PluginDefinition {
            id: id.into(),
            definition: BTreeMap::new(),
        }
    }

    pub fn with_definition(id: impl Into<String>, definition: BTreeMap<String, Ipld>) -> Self {
        PluginDefinition {
            id: id.into(),
            definition,
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: Ipld) -> Self {
        self.definition.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Ipld> {
        self.definition.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_deserializes_serialize_flags() {
        let schema: FieldSchema = toml::from_str(
            r#"
            [columns.format]
            type = "varchar"
            not_null = true

            [columns.value]
            type = "blob"
            serialize = true
            "#,
        )
        .unwrap();

        let columns = schema.columns.unwrap();
        let names: Vec<_> = columns.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["format", "value"]);
        assert_eq!(columns["value"].serialize, Some(true));
        assert_eq!(columns["format"].serialize, None);
        assert!(columns["format"].not_null);
    }

    #[test]
    fn schema_without_columns() {
        let schema: FieldSchema = toml::from_str("").unwrap();
        assert_eq!(schema, FieldSchema::default());
        assert!(schema.columns.is_none());
    }

    #[test]
    fn field_definition_takes_storage_name() {
        let definition = FieldDefinition::new(FieldStorageDefinition::new("field_data", "map"));
        assert_eq!(definition.name(), "field_data");
        assert_eq!(definition.storage().field_type, "map");
    }
}
