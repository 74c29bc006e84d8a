//! A registry of mapped types, for type-erased construction by path.
//!
//! The derive generates descriptors; the registry is the explicit opt-in
//! index over them. [Registering] a type stores a [`TypeMeta`] keyed by
//! [`TypeId`], full type path and short name, so hosts holding only a type
//! name from configuration or wire data can still build instances.
//!
//! [Registering]: TypeRegistry::register

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::build::ObjectBuilder;
use crate::error::MapError;
use crate::info::{Type, TypeInfo, Typed};
use crate::reflection::Constructible;
use crate::value::PlainValue;

/// Builds a boxed instance from plain input fields.
pub type BuildFn = fn(PlainValue) -> Result<Box<dyn Any>, MapError>;

// -----------------------------------------------------------------------------
// TypeMeta

/// A registry entry: the type's descriptor plus its type-erased builder, if
/// the type is constructible.
pub struct TypeMeta {
    info: &'static TypeInfo,
    build: Option<BuildFn>,
}

impl TypeMeta {
    /// Creates an entry for a described type without construction support.
    pub fn of<T: Typed>() -> Self {
        Self {
            info: T::type_info(),
            build: None,
        }
    }

    /// Creates an entry for a constructible type.
    pub fn of_constructible<T: Typed + Constructible>() -> Self {
        Self {
            info: T::type_info(),
            build: Some(|input| {
                ObjectBuilder::new()
                    .build::<T>(input)
                    .map(|built| Box::new(built) as Box<dyn Any>)
            }),
        }
    }

    /// Returns the type identity.
    #[inline]
    pub const fn ty(&self) -> &Type {
        self.info.ty()
    }

    /// Returns the descriptor.
    #[inline]
    pub const fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Returns the type-erased builder, if the type was registered as
    /// constructible.
    #[inline]
    pub const fn build_fn(&self) -> Option<BuildFn> {
        self.build
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of registered type metadata.
///
/// Lookup works by [`TypeId`], by full type path, or by short name; a short
/// name shared by several registered types becomes ambiguous and stops
/// resolving.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::registry::TypeRegistry;
///
/// #[derive(Mapped)]
/// struct Product {
///     name: String,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register_constructible::<Product>();
///
/// let meta = registry.get_by_name("Product")?;
/// assert_eq!(meta.ty().name(), "Product");
/// # Ok::<(), plainmap::MapError>(())
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    metas: HashMap<TypeId, TypeMeta>,
    path_to_id: HashMap<&'static str, TypeId>,
    name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a described type without construction support.
    pub fn register<T: Typed>(&mut self) {
        self.add(TypeMeta::of::<T>());
    }

    /// Registers a constructible type, enabling [`build_by_path`].
    ///
    /// [`build_by_path`]: TypeRegistry::build_by_path
    pub fn register_constructible<T: Typed + Constructible>(&mut self) {
        self.add(TypeMeta::of_constructible::<T>());
    }

    fn add(&mut self, meta: TypeMeta) {
        let ty = *meta.ty();
        if self.metas.insert(ty.id(), meta).is_some() {
            return;
        }

        self.path_to_id.insert(ty.path(), ty.id());

        // Short names must stay unambiguous to resolve.
        let name = ty.name();
        if !self.ambiguous_names.contains(name) {
            if self.name_to_id.contains_key(name) {
                self.name_to_id.remove(name);
                self.ambiguous_names.insert(name);
            } else {
                self.name_to_id.insert(name, ty.id());
            }
        }
    }

    /// Returns the entry for the given [`TypeId`], if registered.
    pub fn get(&self, id: TypeId) -> Option<&TypeMeta> {
        self.metas.get(&id)
    }

    /// Returns the entry for the given full type path.
    pub fn get_by_path(&self, path: &str) -> Result<&TypeMeta, MapError> {
        self.path_to_id
            .get(path)
            .and_then(|id| self.metas.get(id))
            .ok_or_else(|| MapError::unknown_type(path.to_owned()))
    }

    /// Returns the entry for the given short name.
    ///
    /// Fails when the name is unregistered or shared by several registered
    /// types.
    pub fn get_by_name(&self, name: &str) -> Result<&TypeMeta, MapError> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.metas.get(id))
            .ok_or_else(|| MapError::unknown_type(name.to_owned()))
    }

    /// Builds a boxed instance of the type registered under the given path.
    ///
    /// Fails with [`MapError::NotConstructible`] when the path was registered
    /// through [`register`](TypeRegistry::register) rather than
    /// [`register_constructible`](TypeRegistry::register_constructible).
    pub fn build_by_path(&self, path: &str, input: PlainValue) -> Result<Box<dyn Any>, MapError> {
        let meta = self.get_by_path(path)?;
        match meta.build_fn() {
            Some(build) => build(input),
            None => Err(MapError::not_constructible(path.to_owned())),
        }
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}
