use crate::info::Type;

/// A container for compile-time info of types without structural detail.
///
/// Scalars, dates and deferred values ([`Thunk`]) are opaque: the export
/// pipeline handles them by kind, not by field enumeration.
///
/// [`Thunk`]: crate::Thunk
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    /// Creates a new [`OpaqueInfo`] for `T`.
    pub fn new<T: 'static>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    /// Returns the [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }
}
