use crate::error::MapError;
use crate::reflection::{FromPlain, Mapped, MappedRef, Scalar};
use crate::value::PlainValue;

// Signed integers widen to i64 on export and narrow with a range check on
// import. Unsigned integers ride on u64 the same way.

macro_rules! impl_map_signed {
    ($($ty:ty),*) => {
        $(
            impl Mapped for $ty {
                #[inline]
                fn mapped_ref(&self) -> MappedRef<'_> {
                    MappedRef::Scalar(Scalar::Int(i64::from(*self)))
                }
            }

            impl FromPlain for $ty {
                fn from_plain(value: PlainValue) -> Result<Self, MapError> {
                    let wide = match value {
                        PlainValue::Int(n) => n,
                        PlainValue::UInt(n) => i64::try_from(n)
                            .map_err(|_| MapError::invalid_cast(PlainValue::UInt(n), stringify!($ty)))?,
                        other => return Err(MapError::invalid_cast(other, stringify!($ty))),
                    };
                    <$ty>::try_from(wide)
                        .map_err(|_| MapError::invalid_cast(PlainValue::Int(wide), stringify!($ty)))
                }
            }
        )*
    };
}

macro_rules! impl_map_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Mapped for $ty {
                #[inline]
                fn mapped_ref(&self) -> MappedRef<'_> {
                    MappedRef::Scalar(Scalar::UInt(u64::from(*self)))
                }
            }

            impl FromPlain for $ty {
                fn from_plain(value: PlainValue) -> Result<Self, MapError> {
                    let wide = match value {
                        PlainValue::UInt(n) => n,
                        PlainValue::Int(n) => u64::try_from(n)
                            .map_err(|_| MapError::invalid_cast(PlainValue::Int(n), stringify!($ty)))?,
                        other => return Err(MapError::invalid_cast(other, stringify!($ty))),
                    };
                    <$ty>::try_from(wide)
                        .map_err(|_| MapError::invalid_cast(PlainValue::UInt(wide), stringify!($ty)))
                }
            }
        )*
    };
}

impl_map_signed!(i8, i16, i32, i64);
impl_map_unsigned!(u8, u16, u32, u64);

impl Mapped for f64 {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Float(*self))
    }
}

impl FromPlain for f64 {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value {
            PlainValue::Float(n) => Ok(n),
            PlainValue::Int(n) => Ok(n as f64),
            PlainValue::UInt(n) => Ok(n as f64),
            other => Err(MapError::invalid_cast(other, "f64")),
        }
    }
}

impl Mapped for f32 {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Float(f64::from(*self)))
    }
}

impl FromPlain for f32 {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        f64::from_plain(value).map(|n| n as f32)
    }
}

impl Mapped for bool {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Bool(*self))
    }
}

impl FromPlain for bool {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value {
            PlainValue::Bool(b) => Ok(b),
            other => Err(MapError::invalid_cast(other, "bool")),
        }
    }
}

impl Mapped for String {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Str(self))
    }
}

impl FromPlain for String {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        match value {
            PlainValue::Str(s) => Ok(s),
            other => Err(MapError::invalid_cast(other, "alloc::string::String")),
        }
    }
}

impl Mapped for str {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Str(self))
    }
}

impl Mapped for &'static str {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Scalar(Scalar::Str(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_int_cast_checks_range() {
        assert_eq!(u8::from_plain(PlainValue::Int(200)).unwrap(), 200);
        assert!(u8::from_plain(PlainValue::Int(256)).is_err());
        assert!(u64::from_plain(PlainValue::Int(-1)).is_err());
        assert_eq!(i64::from_plain(PlainValue::UInt(7)).unwrap(), 7);
    }

    #[test]
    fn float_cast_accepts_integers() {
        assert_eq!(f64::from_plain(PlainValue::Int(3)).unwrap(), 3.0);
        assert!(f64::from_plain(PlainValue::Str("3".into())).is_err());
    }

    #[test]
    fn string_cast_is_strict() {
        assert_eq!(
            String::from_plain(PlainValue::Str("red".into())).unwrap(),
            "red"
        );
        assert!(String::from_plain(PlainValue::Int(1)).is_err());
    }
}
