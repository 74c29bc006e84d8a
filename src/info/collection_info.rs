use crate::info::Type;

/// A container for compile-time info of collection-capable types.
///
/// Records the declared element type next to the collection's own identity,
/// which is what the import pipeline recurses on.
#[derive(Debug)]
pub struct CollectionInfo {
    ty: Type,
    element: Type,
}

impl CollectionInfo {
    /// Creates a new [`CollectionInfo`] for the collection `T` with element
    /// type `E`.
    pub fn new<T: 'static, E: 'static>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: Type::of::<E>(),
        }
    }

    /// Returns the [`Type`] of the collection itself.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`Type`] of the declared element.
    #[inline]
    pub const fn element(&self) -> &Type {
        &self.element
    }

    /// Returns the full type path of the collection.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }
}
