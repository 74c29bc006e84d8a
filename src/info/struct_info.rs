use crate::info::Type;

// -----------------------------------------------------------------------------
// FieldSpec

/// Information for a named struct field.
///
/// Only instance data participates in mapping; the declared type is recorded
/// as a path for diagnostics, the actual value access goes through
/// [`StructMapped`](crate::StructMapped).
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    type_path: &'static str,
}

impl FieldSpec {
    /// Creates a new [`FieldSpec`] for the given field `name` and type `T`.
    pub fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_path: core::any::type_name::<T>(),
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type path of the field.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// A container for compile-time named struct info.
///
/// Fields are kept in **declaration order**; the single-field wrapper
/// detection and the Discard key mode both rely on that order being stable.
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[FieldSpec]>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`] for `T` from its fields, in declaration
    /// order.
    pub fn new<T: 'static>(fields: Vec<FieldSpec>) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
        }
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

    /// Returns the [`FieldSpec`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`FieldSpec`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
