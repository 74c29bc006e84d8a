use crate::build::ObjectBuilder;
use crate::error::MapError;
use crate::json::JsonMapper;
use crate::reflection::{Constructible, Mapped};
use crate::resolve::ValueResolver;
use crate::value::{KeyPreservation, PlainValue};

/// The public mapping facade, blanket-implemented for every [`Mapped`] type.
///
/// Export runs against the shared [`ValueResolver`]; import runs through a
/// default [`ObjectBuilder`]. Callers needing a non-default argument policy
/// use [`ObjectBuilder`] directly.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::Mapper;
///
/// #[derive(Mapped)]
/// struct Product {
///     name: String,
///     price: f64,
/// }
///
/// let product = Product {
///     name: "book".to_owned(),
///     price: 9.99,
/// };
///
/// assert_eq!(product.to_json()?, r#"{"name":"book","price":9.99}"#);
///
/// let again = Product::from_iterable(product.to_plain())?;
/// assert_eq!(again.name, "book");
/// # Ok::<(), plainmap::MapError>(())
/// ```
pub trait Mapper: Mapped + Sized {
    /// Converts `self` to nested plain data, preserving associative keys.
    fn to_plain(&self) -> PlainValue {
        self.to_plain_with(KeyPreservation::Preserve)
    }

    /// Converts `self` to nested plain data under the given key policy.
    ///
    /// The receiver itself is never unwrapped, so a single-field wrapper
    /// keeps its own field name at the root.
    fn to_plain_with(&self, keys: KeyPreservation) -> PlainValue {
        ValueResolver::shared().resolve_root(self, keys)
    }

    /// Converts `self` to a JSON string, preserving associative keys.
    fn to_json(&self) -> Result<String, MapError> {
        self.to_json_with(KeyPreservation::Preserve)
    }

    /// Converts `self` to a JSON string under the given key policy.
    fn to_json_with(&self, keys: KeyPreservation) -> Result<String, MapError> {
        JsonMapper::render(&self.to_plain_with(keys))
    }

    /// Builds a `Self` from plain input fields.
    ///
    /// Input maps match constructor parameters by name; sequences match by
    /// position. See [`ObjectBuilder`] for the casting and default rules.
    fn from_iterable(fields: impl Into<PlainValue>) -> Result<Self, MapError>
    where
        Self: Constructible,
    {
        ObjectBuilder::new().build(fields.into())
    }
}

impl<T: Mapped + Sized> Mapper for T {}
