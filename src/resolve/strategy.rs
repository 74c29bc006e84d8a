use crate::reflection::{Mapped, MappedKind, MappedRef};
use crate::resolve::resolver::ValueResolver;
use crate::resolve::transform::{enum_to_plain, format_datetime};
use crate::value::{KeyPreservation, PlainMap, PlainValue};

/// A forward-direction transformer for one runtime shape.
///
/// Strategies are stateless and shareable; the
/// [`StrategyResolver`](crate::resolve::StrategyResolver) consults them in
/// descending [`priority`](MappingStrategy::priority) order and uses the
/// first whose [`supports`](MappingStrategy::supports) holds. Enum and date
/// outrank collection and struct on purpose: a date or enum may itself look
/// iterable or struct-like to a lower-priority check.
pub trait MappingStrategy: Send + Sync {
    /// Dispatch priority; higher is checked first.
    fn priority(&self) -> u8;

    /// Returns `true` if this strategy applies to the value.
    fn supports(&self, value: &dyn Mapped) -> bool;

    /// Transforms the value into plain data, recursing through `resolver`
    /// where the shape contains nested values.
    fn map(
        &self,
        value: &dyn Mapped,
        keys: KeyPreservation,
        resolver: &ValueResolver,
    ) -> PlainValue;
}

// -----------------------------------------------------------------------------
// Shape strategies

/// Exports enum cases as backing values or symbolic names.
#[derive(Debug, Default)]
pub struct EnumStrategy;

impl MappingStrategy for EnumStrategy {
    fn priority(&self) -> u8 {
        100
    }

    fn supports(&self, value: &dyn Mapped) -> bool {
        value.mapped_ref().kind() == MappedKind::Enum
    }

    fn map(&self, value: &dyn Mapped, _: KeyPreservation, _: &ValueResolver) -> PlainValue {
        match value.mapped_ref() {
            MappedRef::Enum(value) => enum_to_plain(value),
            _ => PlainValue::Null,
        }
    }
}

/// Passes terminal scalars and null through unchanged.
#[derive(Debug, Default)]
pub struct ScalarStrategy;

impl MappingStrategy for ScalarStrategy {
    fn priority(&self) -> u8 {
        90
    }

    fn supports(&self, value: &dyn Mapped) -> bool {
        value.mapped_ref().kind() == MappedKind::Scalar
    }

    fn map(&self, value: &dyn Mapped, _: KeyPreservation, _: &ValueResolver) -> PlainValue {
        match value.mapped_ref() {
            MappedRef::Scalar(scalar) => scalar.to_plain(),
            _ => PlainValue::Null,
        }
    }
}

/// Formats date/time instants as strings, with the offsetless UTC form.
#[derive(Debug, Default)]
pub struct DateStrategy;

impl MappingStrategy for DateStrategy {
    fn priority(&self) -> u8 {
        80
    }

    fn supports(&self, value: &dyn Mapped) -> bool {
        value.mapped_ref().kind() == MappedKind::Date
    }

    fn map(&self, value: &dyn Mapped, _: KeyPreservation, _: &ValueResolver) -> PlainValue {
        match value.mapped_ref() {
            MappedRef::Date(instant) => PlainValue::Str(format_datetime(instant)),
            _ => PlainValue::Null,
        }
    }
}

/// Recurses through collection elements, re-applying the key policy at this
/// level.
#[derive(Debug, Default)]
pub struct CollectionStrategy;

impl MappingStrategy for CollectionStrategy {
    fn priority(&self) -> u8 {
        70
    }

    fn supports(&self, value: &dyn Mapped) -> bool {
        value.mapped_ref().kind() == MappedKind::Collection
    }

    fn map(
        &self,
        value: &dyn Mapped,
        keys: KeyPreservation,
        resolver: &ValueResolver,
    ) -> PlainValue {
        match value.mapped_ref() {
            MappedRef::Collection(collection) => resolver.resolve_entries(collection, keys),
            _ => PlainValue::Null,
        }
    }
}

/// Resolves values with no structural representation to an empty sequence.
///
/// Export never fails on an unknown leaf shape; this strategy is that
/// policy.
#[derive(Debug, Default)]
pub struct OpaqueStrategy;

impl MappingStrategy for OpaqueStrategy {
    fn priority(&self) -> u8 {
        20
    }

    fn supports(&self, value: &dyn Mapped) -> bool {
        value.mapped_ref().kind() == MappedKind::Opaque
    }

    fn map(&self, _: &dyn Mapped, _: KeyPreservation, _: &ValueResolver) -> PlainValue {
        PlainValue::Array(Vec::new())
    }
}

/// The fallback: enumerates struct fields and recurses into each.
#[derive(Debug, Default)]
pub struct StructStrategy;

impl MappingStrategy for StructStrategy {
    fn priority(&self) -> u8 {
        0
    }

    // Fallback, always applicable.
    fn supports(&self, _: &dyn Mapped) -> bool {
        true
    }

    fn map(
        &self,
        value: &dyn Mapped,
        keys: KeyPreservation,
        resolver: &ValueResolver,
    ) -> PlainValue {
        let MappedRef::Struct(value) = value.mapped_ref() else {
            return PlainValue::Array(Vec::new());
        };

        let info = value.struct_info();
        if keys.should_preserve_keys() {
            let mut map = PlainMap::with_capacity(info.field_len());
            for (index, field) in info.iter().enumerate() {
                if let Some(field_value) = value.field_at(index) {
                    map.insert(field.name(), resolver.resolve(field_value, keys));
                }
            }
            PlainValue::Map(map)
        } else {
            let mut items = Vec::with_capacity(info.field_len());
            for index in 0..info.field_len() {
                if let Some(field_value) = value.field_at(index) {
                    items.push(resolver.resolve(field_value, keys));
                }
            }
            PlainValue::Array(items)
        }
    }
}
