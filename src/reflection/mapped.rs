use core::fmt;

use chrono::{DateTime, FixedOffset};

use crate::info::{Backing, EnumInfo, StructInfo};
use crate::value::{MapKey, PlainValue};

// -----------------------------------------------------------------------------
// Mapped

/// The foundational trait of the export pipeline.
///
/// A `Mapped` value classifies itself into one of the [`MappedRef`] kinds;
/// strategy selection, wrapper unwrapping and key handling are all driven
/// off that classification.
///
/// It's strongly recommended to use
/// [`#[derive(Mapped)]`](crate::derive::Mapped) rather than implementing this
/// trait manually; the derive also generates the descriptor and import-side
/// traits.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::{Mapped, MappedKind};
///
/// #[derive(Mapped)]
/// struct Amount {
///     value: f64,
/// }
///
/// let amount = Amount { value: 9.99 };
/// assert_eq!(amount.mapped_ref().kind(), MappedKind::Struct);
/// ```
pub trait Mapped: Send + Sync {
    /// Classifies this value for mapping.
    fn mapped_ref(&self) -> MappedRef<'_>;

    /// Casts this value to a type-erased mapped value.
    #[inline(always)]
    fn as_mapped(&self) -> &dyn Mapped
    where
        Self: Sized,
    {
        self
    }
}

// -----------------------------------------------------------------------------
// MappedRef

/// An immutable reference to a mapped value, tagged by kind.
pub enum MappedRef<'a> {
    /// A terminal scalar or null; passes through unchanged.
    Scalar(Scalar<'a>),
    /// An enum case; exports as its backing value or symbolic name.
    Enum(&'a dyn EnumMapped),
    /// A date/time instant with offset; exports as a formatted string.
    Date(DateTime<FixedOffset>),
    /// An iterable of elements, optionally keyed.
    Collection(&'a dyn CollectionMapped),
    /// A plain structure; exports by field enumeration.
    Struct(&'a dyn StructMapped),
    /// No structural representation; exports as an empty sequence.
    Opaque,
}

impl MappedRef<'_> {
    /// Returns the [`MappedKind`] of this reference.
    pub const fn kind(&self) -> MappedKind {
        match self {
            Self::Scalar(_) => MappedKind::Scalar,
            Self::Enum(_) => MappedKind::Enum,
            Self::Date(_) => MappedKind::Date,
            Self::Collection(_) => MappedKind::Collection,
            Self::Struct(_) => MappedKind::Struct,
            Self::Opaque => MappedKind::Opaque,
        }
    }
}

/// An enumeration of the kinds of a mapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedKind {
    Scalar,
    Enum,
    Date,
    Collection,
    Struct,
    Opaque,
}

impl fmt::Display for MappedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Enum => f.pad("Enum"),
            Self::Date => f.pad("Date"),
            Self::Collection => f.pad("Collection"),
            Self::Struct => f.pad("Struct"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A terminal scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
}

impl Scalar<'_> {
    /// Converts the scalar into its plain representation.
    pub fn to_plain(self) -> PlainValue {
        match self {
            Self::Null => PlainValue::Null,
            Self::Bool(value) => PlainValue::Bool(value),
            Self::Int(value) => PlainValue::Int(value),
            Self::UInt(value) => PlainValue::UInt(value),
            Self::Float(value) => PlainValue::Float(value),
            Self::Str(value) => PlainValue::Str(value.to_owned()),
        }
    }
}

// -----------------------------------------------------------------------------
// Kind subtraits

/// Field access for struct-kind values.
///
/// Field enumeration order is declaration order; index 0 is the wrapped
/// value for single-field wrapper detection.
pub trait StructMapped: Mapped {
    /// Returns the struct's descriptor.
    fn struct_info(&self) -> &'static StructInfo;

    /// Returns the field value at the given index, if present.
    fn field_at(&self, index: usize) -> Option<&dyn Mapped>;

    /// Returns the field value with the given name, if present.
    fn field(&self, name: &str) -> Option<&dyn Mapped> {
        self.field_at(self.struct_info().index_of(name)?)
    }

    /// Returns the number of fields.
    #[inline]
    fn field_len(&self) -> usize {
        self.struct_info().field_len()
    }
}

/// Case access for enum-kind values.
pub trait EnumMapped: Mapped {
    /// Returns the enum's descriptor.
    fn enum_info(&self) -> &'static EnumInfo;

    /// Returns the symbolic name of the current case.
    fn case_name(&self) -> &'static str;

    /// Returns the backing value of the current case, if the enum is backed.
    fn backing(&self) -> Option<Backing>;
}

/// Element access for collection-kind values.
pub trait CollectionMapped: Mapped {
    /// An iterator over the elements, each with an optional associative key.
    ///
    /// Keyless entries are treated as a dense sequence; keyed entries form a
    /// mapping under [`KeyPreservation::Preserve`](crate::KeyPreservation).
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_>;

    /// Returns the number of elements.
    fn entry_len(&self) -> usize;
}
