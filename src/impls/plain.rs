use crate::error::MapError;
use crate::reflection::{CollectionMapped, FromPlain, Mapped, MappedRef, Scalar};
use crate::value::{MapKey, PlainValue};

// Already-plain data participates on both sides: it exports as itself and
// imports by passthrough. A parameter declared as `PlainValue` accepts any
// input shape without casting.

impl Mapped for PlainValue {
    fn mapped_ref(&self) -> MappedRef<'_> {
        match self {
            Self::Null => MappedRef::Scalar(Scalar::Null),
            Self::Bool(value) => MappedRef::Scalar(Scalar::Bool(*value)),
            Self::Int(value) => MappedRef::Scalar(Scalar::Int(*value)),
            Self::UInt(value) => MappedRef::Scalar(Scalar::UInt(*value)),
            Self::Float(value) => MappedRef::Scalar(Scalar::Float(*value)),
            Self::Str(value) => MappedRef::Scalar(Scalar::Str(value)),
            Self::Array(_) | Self::Map(_) => MappedRef::Collection(self),
        }
    }
}

impl CollectionMapped for PlainValue {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        match self {
            Self::Array(items) => {
                Box::new(items.iter().map(|item| (None, item as &dyn Mapped)))
            }
            Self::Map(map) => Box::new(
                map.iter()
                    .map(|(key, value)| (Some(key.clone()), value as &dyn Mapped)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn entry_len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Map(map) => map.len(),
            _ => 0,
        }
    }
}

impl FromPlain for PlainValue {
    #[inline]
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::MappedKind;

    #[test]
    fn plain_value_classifies_itself() {
        assert_eq!(PlainValue::Int(1).mapped_ref().kind(), MappedKind::Scalar);
        assert_eq!(
            PlainValue::Array(vec![]).mapped_ref().kind(),
            MappedKind::Collection
        );
    }

    #[test]
    fn passthrough_import() {
        let input = PlainValue::Str("anything".into());
        assert_eq!(PlainValue::from_plain(input.clone()).unwrap(), input);
    }
}
