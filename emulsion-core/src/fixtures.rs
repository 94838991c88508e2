//! Test doubles for the object and field model.

use std::collections::BTreeMap;

use ipld_core::ipld::Ipld;

use crate::cache::{CacheabilitySink, CacheableDependency};
use crate::field::{
    EntityType, FIELD_ITEM_INTERFACE, FIELD_ITEM_LIST_INTERFACE, FieldDefinition, FieldItem,
    FieldItemList, FieldSchema, FieldStorageDefinition, PluginDefinition,
};
use crate::object::Object;
use crate::types::{TypeInfo, TypeRegistry};

pub(crate) static ENTITY: TypeInfo = TypeInfo::new("EntityInterface", &[]);
pub(crate) static CONTENT_ENTITY: TypeInfo = TypeInfo::new("ContentEntityInterface", &[&ENTITY]);
pub(crate) static NODE: TypeInfo = TypeInfo::new("Node", &[&CONTENT_ENTITY]);
pub(crate) static OPAQUE: TypeInfo = TypeInfo::new("Opaque", &[]);
pub(crate) static MAP_ITEM: TypeInfo = TypeInfo::new("MapItem", &[&FIELD_ITEM_INTERFACE]);
pub(crate) static ITEM_LIST: TypeInfo =
    TypeInfo::new("FieldItemList", &[&FIELD_ITEM_LIST_INTERFACE]);
pub(crate) static HOLLOW_ITEM: TypeInfo = TypeInfo::new("HollowItem", &[&FIELD_ITEM_INTERFACE]);
pub(crate) static HOLLOW_LIST: TypeInfo =
    TypeInfo::new("HollowList", &[&FIELD_ITEM_LIST_INTERFACE]);

pub(crate) fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(&NODE)
        .register(&OPAQUE)
        .register(&MAP_ITEM)
        .register(&ITEM_LIST);
    registry
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    tags: Vec<String>,
}

impl Node {
    pub(crate) fn with_tags(tags: &[&str]) -> Self {
        Node { tags: strings(tags) }
    }
}

impl Object for Node {
    fn type_info(&self) -> &'static TypeInfo {
        &NODE
    }

    fn as_cacheable(&self) -> Option<&dyn CacheableDependency> {
        Some(self)
    }
}

impl CacheableDependency for Node {
    fn cache_tags(&self) -> &[String] {
        &self.tags
    }

    fn cache_contexts(&self) -> &[String] {
        &[]
    }
}

/// An object with no capabilities and no registered ancestors.
#[derive(Debug)]
pub(crate) struct Opaque;

impl Object for Opaque {
    fn type_info(&self) -> &'static TypeInfo {
        &OPAQUE
    }
}

/// Claims a field type but exposes none of the matching views.
#[derive(Debug)]
pub(crate) struct Hollow(pub(crate) &'static TypeInfo);

impl Object for Hollow {
    fn type_info(&self) -> &'static TypeInfo {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TestItem {
    definition: FieldDefinition,
    schema: FieldSchema,
    main_property: Option<String>,
    parent: Option<String>,
    entity_type: Option<EntityType>,
    plugin: Option<PluginDefinition>,
    values: BTreeMap<String, Ipld>,
    tags: Vec<String>,
}

impl TestItem {
    pub(crate) fn new(field_name: &str) -> Self {
        TestItem {
            definition: FieldDefinition::new(FieldStorageDefinition::new(field_name, "map")),
            schema: FieldSchema::default(),
            main_property: None,
            parent: None,
            entity_type: None,
            plugin: None,
            values: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    pub(crate) fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    pub(crate) fn with_main_property(mut self, name: &str) -> Self {
        self.main_property = Some(name.to_string());
        self
    }

    pub(crate) fn with_parent(mut self, name: &str) -> Self {
        self.parent = Some(name.to_string());
        self
    }

    pub(crate) fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub(crate) fn with_plugin(mut self, plugin: PluginDefinition) -> Self {
        self.plugin = Some(plugin);
        self
    }

    pub(crate) fn with_values<'a>(
        mut self,
        values: impl IntoIterator<Item = (&'a str, Ipld)>,
    ) -> Self {
        self.values = values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self
    }

    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = strings(tags);
        self
    }
}

impl Object for TestItem {
    fn type_info(&self) -> &'static TypeInfo {
        &MAP_ITEM
    }

    fn as_cacheable(&self) -> Option<&dyn CacheableDependency> {
        Some(self)
    }

    fn as_field_item(&self) -> Option<&dyn FieldItem> {
        Some(self)
    }
}

impl CacheableDependency for TestItem {
    fn cache_tags(&self) -> &[String] {
        &self.tags
    }

    fn cache_contexts(&self) -> &[String] {
        &[]
    }
}

impl FieldItem for TestItem {
    fn name(&self) -> &str {
        "0"
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    fn main_property_name(&self) -> Option<&str> {
        self.main_property.as_deref()
    }

    fn field_definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn schema(&self, _storage: &FieldStorageDefinition) -> FieldSchema {
        self.schema.clone()
    }

    fn entity_type(&self) -> Option<&EntityType> {
        self.entity_type.as_ref()
    }

    fn plugin_definition(&self) -> Option<&PluginDefinition> {
        self.plugin.as_ref()
    }

    fn values(&self) -> BTreeMap<String, Ipld> {
        self.values.clone()
    }

    fn set_values(&mut self, values: BTreeMap<String, Ipld>) {
        self.values = values;
    }
}

#[derive(Debug)]
pub(crate) struct TestList {
    name: String,
    items: Vec<TestItem>,
    tags: Vec<String>,
}

impl TestList {
    pub(crate) fn new(name: &str, items: Vec<TestItem>) -> Self {
        TestList {
            name: name.to_string(),
            items,
            tags: Vec::new(),
        }
    }

    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = strings(tags);
        self
    }
}

impl Object for TestList {
    fn type_info(&self) -> &'static TypeInfo {
        &ITEM_LIST
    }

    fn as_cacheable(&self) -> Option<&dyn CacheableDependency> {
        Some(self)
    }

    fn as_field_item_list(&self) -> Option<&dyn FieldItemList> {
        Some(self)
    }
}

impl CacheableDependency for TestList {
    fn cache_tags(&self) -> &[String] {
        &self.tags
    }

    fn cache_contexts(&self) -> &[String] {
        &[]
    }
}

impl FieldItemList for TestList {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> Vec<&dyn Object> {
        self.items.iter().map(|item| item as &dyn Object).collect()
    }
}

/// Sink that counts forwarded dependencies and keeps their tags in order.
#[derive(Debug, Default)]
pub(crate) struct CountingSink {
    pub(crate) count: usize,
    pub(crate) tags: Vec<String>,
}

impl CacheabilitySink for CountingSink {
    fn add_cacheable_dependency(&mut self, dependency: &dyn CacheableDependency) {
        self.count += 1;
        self.tags.extend(dependency.cache_tags().iter().cloned());
    }
}
