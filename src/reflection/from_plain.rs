use crate::error::MapError;
use crate::info::ConstructorSpec;
use crate::value::PlainValue;

// -----------------------------------------------------------------------------
// FromPlain

/// Reconstructs a typed value from plain input.
///
/// This is the import-side caster, selected at compile time by the declared
/// parameter type: enums scan their cases, dates parse, collections recurse
/// per element, derived structs go through the
/// [`ObjectBuilder`](crate::ObjectBuilder), and [`PlainValue`] itself passes
/// through unchanged.
///
/// # Failure
///
/// A failed cast aborts the entire construction it is part of; no partial
/// object is ever returned.
pub trait FromPlain: Sized {
    /// Casts the raw input to `Self`.
    fn from_plain(value: PlainValue) -> Result<Self, MapError>;

    /// The type-appropriate "absent" value, if the type has one.
    ///
    /// `Option<T>` yields `Some(None)`; most types yield `None` and make an
    /// omitted, defaultless constructor argument an error.
    #[inline]
    fn vacant() -> Option<Self> {
        None
    }
}

// -----------------------------------------------------------------------------
// Constructible

/// A type the import pipeline can instantiate.
///
/// Implemented by [`#[derive(Mapped)]`](crate::derive::Mapped). The generated
/// `construct` lives in the type's defining module and builds the value
/// directly, so types whose hand-written construction surface is private
/// (named factory methods, sealed constructors) opt into mapper support by
/// deriving instead of being instantiated behind their owner's back.
pub trait Constructible: Sized + 'static {
    /// Returns the constructor descriptor, computed once per program run.
    fn constructor_spec() -> &'static ConstructorSpec;

    /// Instantiates `Self` from a fully-cast argument list, in declared
    /// parameter order.
    fn construct(args: crate::info::Arguments) -> Result<Self, MapError>;
}

// -----------------------------------------------------------------------------
// Collectible

/// The capability a collection type opts into to participate in mapping.
///
/// A collectible exposes its declared element type, a factory and element
/// access; [`impl_collectible!`](crate::impl_collectible) generates the
/// mapping traits on top of these three items.
///
/// # Examples
///
/// ```
/// use plainmap::Collectible;
///
/// struct Products {
///     elements: Vec<String>,
/// }
///
/// impl Collectible for Products {
///     type Element = String;
///
///     fn create_from(elements: Vec<String>) -> Self {
///         Self { elements }
///     }
///
///     fn elements(&self) -> &[String] {
///         &self.elements
///     }
/// }
/// ```
pub trait Collectible: Sized {
    /// The declared element type.
    type Element;

    /// Assembles a collection from already-cast elements.
    fn create_from(elements: Vec<Self::Element>) -> Self;

    /// Returns the elements in order.
    fn elements(&self) -> &[Self::Element];
}
