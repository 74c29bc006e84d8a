//! Compile-time type descriptors.
//!
//! ## Menu
//!
//! - [`Type`]: type identity (a [`TypeId`] plus the type path).
//! - [`TypeInfo`]: the descriptor root, one variant per describable shape.
//! - [`StructInfo`] / [`FieldSpec`]: named structs and their fields.
//! - [`EnumInfo`] / [`CaseInfo`] / [`Backing`]: unit enums, optionally backed
//!   by a primitive value per case.
//! - [`CollectionInfo`]: collection-capable types and their element type.
//! - [`OpaqueInfo`]: everything without structural detail.
//! - [`ConstructorSpec`] / [`ParamSpec`] / [`Arguments`]: the reverse
//!   pipeline's constructor descriptors.
//! - [`GenericTypeInfoCell`]: keyed descriptor storage for generic types,
//!   where a plain `OnceLock` static would be shared across instantiations.
//!
//! Descriptors are generated by [`#[derive(Mapped)]`](crate::derive::Mapped)
//! and cached in a `OnceLock` per type; type shapes are immutable at runtime
//! so no invalidation exists.

use core::any::TypeId;

mod cell;
mod collection_info;
mod constructor;
mod enum_info;
mod opaque_info;
mod struct_info;

pub use cell::GenericTypeInfoCell;
pub use collection_info::CollectionInfo;
pub use constructor::{Arguments, ConstructorSpec, InvokeFn, ParamSpec};
pub use enum_info::{Backing, CaseInfo, EnumInfo};
pub use opaque_info::OpaqueInfo;
pub use struct_info::{FieldSpec, StructInfo};

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Returns the [`Type`] of `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `my_crate::orders::Order`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the unqualified type name, e.g. `Order`.
    pub fn name(&self) -> &'static str {
        let base = self.path.split('<').next().unwrap_or(self.path);
        base.rsplit("::").next().unwrap_or(base)
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information for a describable type.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::info::Typed;
///
/// #[derive(Mapped)]
/// struct Amount {
///     value: f64,
/// }
///
/// let info = Amount::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("value"), Some(0));
/// ```
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    Enum(EnumInfo),
    Collection(CollectionInfo),
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Collection(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the [`StructInfo`], if this describes a struct.
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the [`EnumInfo`], if this describes an enum.
    pub const fn as_enum(&self) -> Option<&EnumInfo> {
        match self {
            Self::Enum(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the [`CollectionInfo`], if this describes a collection.
    pub const fn as_collection(&self) -> Option<&CollectionInfo> {
        match self {
            Self::Collection(info) => Some(info),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A type with a static [`TypeInfo`] descriptor.
///
/// Implemented by [`#[derive(Mapped)]`](crate::derive::Mapped); the
/// descriptor is computed once and cached for the lifetime of the program.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no type descriptor",
    note = "consider annotating `{Self}` with `#[derive(Mapped)]`"
)]
pub trait Typed: 'static {
    /// Returns the descriptor for this type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn type_name_strips_path_and_generics() {
        assert_eq!(Type::of::<String>().name(), "String");
        assert_eq!(Type::of::<Vec<i32>>().name(), "Vec");
    }
}
