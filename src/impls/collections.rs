use std::collections::{BTreeMap, HashMap};

use crate::error::MapError;
use crate::reflection::{CollectionMapped, FromPlain, Mapped, MappedRef};
use crate::value::{MapKey, PlainValue};

// -----------------------------------------------------------------------------
// Sequences

impl<T: Mapped> Mapped for Vec<T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for Vec<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(self.iter().map(|element| (None, element as &dyn Mapped)))
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for Vec<T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value {
            PlainValue::Array(elements) => elements.into_iter().map(T::from_plain).collect(),
            // Keyed input contributes its values in order.
            PlainValue::Map(map) => map.into_values().map(T::from_plain).collect(),
            other => Err(MapError::invalid_cast(other, "alloc::vec::Vec")),
        }
    }
}

impl<T: Mapped> Mapped for &[T] {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for &[T] {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(self.iter().map(|element| (None, element as &dyn Mapped)))
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

// -----------------------------------------------------------------------------
// Keyed collections

impl<T: Mapped> Mapped for BTreeMap<String, T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for BTreeMap<String, T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, element)| (Some(MapKey::from(key.as_str())), element as &dyn Mapped)),
        )
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for BTreeMap<String, T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        let PlainValue::Map(map) = value else {
            return Err(MapError::invalid_cast(
                value,
                "alloc::collections::BTreeMap",
            ));
        };

        map.into_iter()
            .map(|(key, element)| {
                let key = match key {
                    MapKey::Str(key) => key,
                    MapKey::Int(key) => key.to_string(),
                };
                Ok((key, T::from_plain(element)?))
            })
            .collect()
    }
}

impl<T: Mapped> Mapped for BTreeMap<i64, T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for BTreeMap<i64, T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, element)| (Some(MapKey::Int(*key)), element as &dyn Mapped)),
        )
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for BTreeMap<i64, T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value {
            PlainValue::Map(map) => map
                .into_iter()
                .map(|(key, element)| {
                    let key = match &key {
                        MapKey::Int(key) => *key,
                        MapKey::Str(text) => text.parse::<i64>().map_err(|_| {
                            MapError::invalid_cast(
                                PlainValue::Str(text.clone()),
                                "alloc::collections::BTreeMap",
                            )
                        })?,
                    };
                    Ok((key, T::from_plain(element)?))
                })
                .collect(),
            PlainValue::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| Ok((index as i64, T::from_plain(element)?)))
                .collect(),
            other => Err(MapError::invalid_cast(
                other,
                "alloc::collections::BTreeMap",
            )),
        }
    }
}

impl<T: Mapped> Mapped for HashMap<String, T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for HashMap<String, T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, element)| (Some(MapKey::from(key.as_str())), element as &dyn Mapped)),
        )
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for HashMap<String, T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        let PlainValue::Map(map) = value else {
            return Err(MapError::invalid_cast(value, "std::collections::HashMap"));
        };

        map.into_iter()
            .map(|(key, element)| {
                let key = match key {
                    MapKey::Str(key) => key,
                    MapKey::Int(key) => key.to_string(),
                };
                Ok((key, T::from_plain(element)?))
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// User collections

/// Generates the mapping traits for a type implementing
/// [`Collectible`](crate::Collectible).
///
/// Elements export keyless, in order, and import by casting each input
/// element to the declared element type before assembly through
/// `create_from`. The generated `Typed` impl describes the collection with
/// its declared element type, so a collectible can be registered in a
/// [`TypeRegistry`](crate::registry::TypeRegistry) like any derived type.
///
/// # Examples
///
/// ```
/// use plainmap::derive::Mapped;
/// use plainmap::{impl_collectible, Collectible, Mapper};
///
/// #[derive(Mapped)]
/// struct Product {
///     name: String,
/// }
///
/// struct Products(Vec<Product>);
///
/// impl Collectible for Products {
///     type Element = Product;
///
///     fn create_from(elements: Vec<Product>) -> Self {
///         Self(elements)
///     }
///
///     fn elements(&self) -> &[Product] {
///         &self.0
///     }
/// }
///
/// impl_collectible!(Products);
///
/// let products = Products::create_from(vec![Product { name: "book".to_owned() }]);
/// assert_eq!(products.to_json()?, r#"[{"name":"book"}]"#);
/// # Ok::<(), plainmap::MapError>(())
/// ```
#[macro_export]
macro_rules! impl_collectible {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: ::std::sync::OnceLock<$crate::info::TypeInfo> =
                    ::std::sync::OnceLock::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Collection($crate::info::CollectionInfo::new::<
                        $ty,
                        <$ty as $crate::Collectible>::Element,
                    >())
                })
            }
        }

        impl $crate::Mapped for $ty {
            #[inline]
            fn mapped_ref(&self) -> $crate::MappedRef<'_> {
                $crate::MappedRef::Collection(self)
            }
        }

        impl $crate::CollectionMapped for $ty {
            fn entries(
                &self,
            ) -> ::std::boxed::Box<
                dyn ::std::iter::Iterator<
                        Item = (
                            ::std::option::Option<$crate::MapKey>,
                            &dyn $crate::Mapped,
                        ),
                    > + '_,
            > {
                ::std::boxed::Box::new(
                    $crate::Collectible::elements(self)
                        .iter()
                        .map(|element| (::std::option::Option::None, element as &dyn $crate::Mapped)),
                )
            }

            fn entry_len(&self) -> usize {
                $crate::Collectible::elements(self).len()
            }
        }

        impl $crate::FromPlain for $ty {
            fn from_plain(value: $crate::PlainValue) -> ::std::result::Result<Self, $crate::MapError> {
                let elements =
                    <::std::vec::Vec<<$ty as $crate::Collectible>::Element> as $crate::FromPlain>::from_plain(value)?;
                ::std::result::Result::Ok(<$ty as $crate::Collectible>::create_from(elements))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_import_accepts_keyed_input() {
        let mut map = crate::value::PlainMap::new();
        map.insert("first", 1i64);
        map.insert("second", 2i64);

        let elements = Vec::<i64>::from_plain(PlainValue::Map(map)).unwrap();
        assert_eq!(elements, vec![1, 2]);
    }

    #[test]
    fn int_keyed_map_import_parses_string_keys() {
        let mut map = crate::value::PlainMap::new();
        map.insert("10", "a");
        map.insert(MapKey::Int(11), "b");

        let imported = BTreeMap::<i64, String>::from_plain(PlainValue::Map(map)).unwrap();
        assert_eq!(imported[&10], "a");
        assert_eq!(imported[&11], "b");
    }

    #[test]
    fn element_cast_failure_aborts_the_collection() {
        let input = PlainValue::Array(vec![PlainValue::Int(1), PlainValue::Str("x".into())]);
        assert!(Vec::<i64>::from_plain(input).is_err());
    }
}
