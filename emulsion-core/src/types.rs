use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::ptr;

use log::debug;

use crate::object::Data;

/// Static description of a type and the types it extends or implements.
///
/// A type is a subtype of every transitive parent. Parents may stand for
/// classes or interfaces alike.
///
/// ```
/// use emulsion_core::TypeInfo;
///
/// static ENTITY: TypeInfo = TypeInfo::new("EntityInterface", &[]);
/// static NODE: TypeInfo = TypeInfo::new("Node", &[&ENTITY]);
///
/// assert!(NODE.is_a("Node"));
/// assert!(NODE.is_subtype_of("EntityInterface"));
/// assert!(!ENTITY.is_subtype_of("Node"));
/// ```
pub struct TypeInfo {
    name: &'static str,
    parents: &'static [&'static TypeInfo],
}

impl TypeInfo {
    pub const fn new(name: &'static str, parents: &'static [&'static TypeInfo]) -> Self {
        TypeInfo { name, parents }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parents, in declaration order.
    pub fn parents(&self) -> &'static [&'static TypeInfo] {
        self.parents
    }

    /// True if this type is `name` or a subtype of it.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.is_subtype_of(name)
    }

    /// True if this type strictly derives from `name`.
    ///
    /// Each ancestor is visited once, so cyclic parent links terminate.
    pub fn is_subtype_of(&self, name: &str) -> bool {
        let mut visited: Vec<&TypeInfo> = vec![self];
        let mut pending: Vec<&TypeInfo> = self.parents.to_vec();

        while let Some(info) = pending.pop() {
            if visited.iter().any(|seen| ptr::eq(*seen, info)) {
                continue;
            }
            if info.name == name {
                return true;
            }
            visited.push(info);
            pending.extend(info.parents.iter().copied());
        }
        false
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field(
                "parents",
                &self.parents.iter().map(|p| p.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A type with a static descriptor.
///
/// Usually implemented through `#[derive(Object)]`.
pub trait Typed {
    fn descriptor() -> &'static TypeInfo;
}

/// Oracle for relationships between type names.
///
/// Denormalization dispatches on a target type *name* before any instance
/// exists, so names have to be resolved through registered descriptors.
/// A name is resolvable iff it has been registered, directly or as an
/// ancestor of a registered type.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, &'static TypeInfo>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor together with all of its ancestors.
    ///
    /// The first descriptor registered under a name wins.
    pub fn register(&mut self, info: &'static TypeInfo) -> &mut Self {
        if self.types.contains_key(info.name) {
            return self;
        }
        self.types.insert(info.name, info);
        for parent in info.parents {
            self.register(parent);
        }
        self
    }

    /// Registers the descriptor of `T`.
    pub fn register_type<T: Typed>(&mut self) -> &mut Self {
        self.register(T::descriptor())
    }

    /// Looks up a descriptor by name.
    pub fn resolve(&self, name: &str) -> Option<&'static TypeInfo> {
        self.types.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// True if `type_name` resolves and strictly derives from `ancestor`.
    pub fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        self.resolve(type_name)
            .is_some_and(|info| info.is_subtype_of(ancestor))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The type names a handler declares it can (de)normalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedTypeSet(Vec<Cow<'static, str>>);

impl SupportedTypeSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        SupportedTypeSet(names.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|name| name.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `data` is an object that is, or derives from, any supported
    /// type. Primitive values never match.
    ///
    /// Matching walks the instance's own descriptor, so the most-derived type
    /// does not need to be registered anywhere.
    pub fn matches_instance(&self, data: Data<'_>) -> bool {
        let Some(object) = data.as_object() else {
            return false;
        };
        let info = object.type_info();
        self.iter().any(|supported| info.is_a(supported))
    }

    /// True if `type_name` equals a supported entry, or is a registered
    /// strict subtype of one. Unresolvable entries are skipped.
    pub fn matches_type_name(&self, registry: &TypeRegistry, type_name: &str) -> bool {
        if self.iter().any(|supported| supported == type_name) {
            return true;
        }
        self.iter().any(|supported| {
            if !registry.contains(supported) {
                debug!("skipping unresolvable supported type {supported}");
                return false;
            }
            registry.is_subtype_of(type_name, supported)
        })
    }
}

impl From<&'static TypeInfo> for SupportedTypeSet {
    fn from(info: &'static TypeInfo) -> Self {
        SupportedTypeSet::new([info.name()])
    }
}

impl From<&'static str> for SupportedTypeSet {
    fn from(name: &'static str) -> Self {
        SupportedTypeSet::new([name])
    }
}

impl<const N: usize> From<[&'static str; N]> for SupportedTypeSet {
    fn from(names: [&'static str; N]) -> Self {
        SupportedTypeSet::new(names)
    }
}
