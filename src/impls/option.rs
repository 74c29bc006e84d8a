use crate::error::MapError;
use crate::reflection::{FromPlain, Mapped, MappedRef, Scalar};
use crate::value::PlainValue;

impl<T: Mapped> Mapped for Option<T> {
    fn mapped_ref(&self) -> MappedRef<'_> {
        match self {
            Some(inner) => inner.mapped_ref(),
            None => MappedRef::Scalar(Scalar::Null),
        }
    }
}

impl<T: FromPlain> FromPlain for Option<T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_plain(value).map(Some)
        }
    }

    // The one type family with a natural "absent" value.
    #[inline]
    fn vacant() -> Option<Self> {
        Some(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::MappedKind;

    #[test]
    fn none_maps_to_null() {
        let value: Option<i64> = None;
        assert_eq!(value.mapped_ref().kind(), MappedKind::Scalar);
        assert!(matches!(
            value.mapped_ref(),
            MappedRef::Scalar(Scalar::Null)
        ));
    }

    #[test]
    fn null_input_becomes_none() {
        assert_eq!(Option::<i64>::from_plain(PlainValue::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::from_plain(PlainValue::Int(5)).unwrap(),
            Some(5)
        );
    }

    #[test]
    fn option_is_vacant_capable() {
        assert_eq!(Option::<String>::vacant(), Some(None));
        assert_eq!(String::vacant(), None);
    }
}
