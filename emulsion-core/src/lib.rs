//! Emulsion converts structured objects to and from a generic,
//! format-agnostic representation (IPLD data model: maps, lists, scalars).
//!
//! Core concepts:
//! - **Object**: A structured value with a static type descriptor and optional capabilities
//! - **TypeInfo / TypeRegistry**: Type descriptors and the oracle resolving type names
//! - **Handler**: A normalizer and/or denormalizer built on a [`NormalizerBase`]
//! - **Serializer**: Dispatches each request to the first handler declaring support
//! - **Context**: Per-call options threaded through nested handler invocations
//!
//! Handlers declare the types (and optionally formats) they support. Normalization
//! matches live instances against those types; denormalization matches a target
//! type *name*, resolved through the [`TypeRegistry`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use emulsion_core::{Data, NormalizerBase, TypeInfo, TypeRegistry};
//! use emulsion_core::ipld::Ipld;
//!
//! static ENTITY: TypeInfo = TypeInfo::new("EntityInterface", &[]);
//! static NODE: TypeInfo = TypeInfo::new("Node", &[&ENTITY]);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(&NODE);
//!
//! let base = NormalizerBase::new(Arc::new(registry), &ENTITY).with_formats("json");
//!
//! assert!(base.supports_denormalization(&Ipld::Null, "Node", Some("json")));
//! assert!(!base.supports_denormalization(&Ipld::Null, "Node", Some("xml")));
//! assert!(!base.supports_normalization(Data::Value(&Ipld::Integer(1)), Some("json")));
//! ```
//!
//! # Serialized columns
//!
//! Denormalizing into a field item goes through [`check_for_opaque_strings`], which
//! rejects literal strings for storage columns holding encoded blobs. Such fields need
//! a specialized denormalizer registered ahead of the generic one.

mod cache;
mod context;
pub mod definitions;
mod error;
mod field;
mod format;
pub mod guard;
mod normalizer;
pub mod normalizers;
mod object;
mod serializer;
mod types;

#[cfg(test)]
mod fixtures;

pub use cache::{
    CacheabilitySink, CacheableDependency, CacheableMetadata, MaxAge, record_if_cacheable,
};
pub use context::Context;
pub use definitions::Definitions;
pub use error::Error;
pub use field::{
    ColumnSchema, EntityType, FIELD_ITEM_INTERFACE, FIELD_ITEM_LIST_INTERFACE, FieldDefinition,
    FieldItem, FieldItemList, FieldSchema, FieldStorageDefinition, PluginDefinition,
};
pub use format::{FormatSet, check_format};
pub use guard::{SerializedPropertySource, check_for_opaque_strings, serialized_property_names};
pub use normalizer::{Denormalized, Denormalizer, Handler, Normalizer, NormalizerBase};
pub use object::{Data, Object};
pub use serializer::{Serializer, SerializerBuilder};
pub use types::{SupportedTypeSet, TypeInfo, TypeRegistry, Typed};

pub use ipld_core::ipld;

#[cfg(feature = "derive")]
pub use emulsion_derive::Object;
