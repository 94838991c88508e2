use std::fmt::Debug;

use ipld_core::ipld::Ipld;

use crate::cache::CacheableDependency;
use crate::field::{FieldItem, FieldItemList};
use crate::types::TypeInfo;

/// A structured value that handlers can normalize.
///
/// Capabilities beyond the type descriptor are exposed as optional views, so
/// handlers can query them without knowing the concrete type. Every view
/// defaults to `None`.
pub trait Object: Debug {
    /// Returns the descriptor of the most-derived type of this value.
    fn type_info(&self) -> &'static TypeInfo;

    /// Cache invalidation metadata carried by this value, if any.
    fn as_cacheable(&self) -> Option<&dyn CacheableDependency> {
        None
    }

    fn as_field_item(&self) -> Option<&dyn FieldItem> {
        None
    }

    fn as_field_item_list(&self) -> Option<&dyn FieldItemList> {
        None
    }
}

/// The subject of a normalization request.
///
/// `Value` holds data that is already in the generic representation
/// (scalars, lists, maps); `Object` holds a structured value.
#[derive(Debug, Clone, Copy)]
pub enum Data<'a> {
    Value(&'a Ipld),
    Object(&'a dyn Object),
}

impl<'a> Data<'a> {
    pub fn as_object(&self) -> Option<&'a dyn Object> {
        match self {
            Data::Object(object) => Some(*object),
            Data::Value(_) => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Data::Object(_))
    }

    /// Name used in diagnostics: the object's type name, or the kind of
    /// generic value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Data::Object(object) => object.type_info().name(),
            Data::Value(value) => ipld_kind(value),
        }
    }
}

impl<'a> From<&'a Ipld> for Data<'a> {
    fn from(value: &'a Ipld) -> Self {
        Data::Value(value)
    }
}

impl<'a> From<&'a dyn Object> for Data<'a> {
    fn from(object: &'a dyn Object) -> Self {
        Data::Object(object)
    }
}

fn ipld_kind(value: &Ipld) -> &'static str {
    match value {
        Ipld::Null => "null",
        Ipld::Bool(_) => "bool",
        Ipld::Integer(_) => "integer",
        Ipld::Float(_) => "float",
        Ipld::String(_) => "string",
        Ipld::Bytes(_) => "bytes",
        Ipld::List(_) => "list",
        Ipld::Map(_) => "map",
        Ipld::Link(_) => "link",
    }
}
