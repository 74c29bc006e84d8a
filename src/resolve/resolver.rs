use std::sync::OnceLock;

use crate::reflection::{CollectionMapped, Mapped};
use crate::resolve::strategy::{
    CollectionStrategy, DateStrategy, EnumStrategy, MappingStrategy, OpaqueStrategy,
    ScalarStrategy, StructStrategy,
};
use crate::resolve::unwrap::unwrap_value_object;
use crate::value::{KeyPreservation, MapKey, PlainMap, PlainValue};

// -----------------------------------------------------------------------------
// StrategyResolver

/// The immutable, priority-ordered strategy list.
///
/// Built once and shared; never mutated afterwards, so concurrent
/// resolutions can read it without locking.
pub struct StrategyResolver {
    strategies: Vec<Box<dyn MappingStrategy>>,
    fallback: StructStrategy,
}

impl StrategyResolver {
    /// Creates a dispatcher from the given strategies, ordered by descending
    /// priority. The struct fallback is always present and always last.
    pub fn new(mut strategies: Vec<Box<dyn MappingStrategy>>) -> Self {
        strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            strategies,
            fallback: StructStrategy,
        }
    }

    /// The standard strategy set: enum, scalar, date, collection, opaque,
    /// with the struct fallback.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(EnumStrategy),
            Box::new(ScalarStrategy),
            Box::new(DateStrategy),
            Box::new(CollectionStrategy),
            Box::new(OpaqueStrategy),
        ])
    }

    /// Returns the first strategy supporting `value`, or the struct
    /// fallback.
    pub fn resolve(&self, value: &dyn Mapped) -> &dyn MappingStrategy {
        for strategy in &self.strategies {
            if strategy.supports(value) {
                return strategy.as_ref();
            }
        }
        &self.fallback
    }
}

impl Default for StrategyResolver {
    fn default() -> Self {
        Self::standard()
    }
}

// -----------------------------------------------------------------------------
// ValueResolver

/// The recursion driver of the export pipeline.
///
/// Single source of truth for wrapper unwrapping and key handling: every
/// recursion level re-applies the [`KeyPreservation`] policy independently,
/// so Discard produces dense indices at every nesting depth.
pub struct ValueResolver {
    dispatch: StrategyResolver,
}

impl ValueResolver {
    /// Creates a resolver over the given dispatcher.
    pub fn new(dispatch: StrategyResolver) -> Self {
        Self { dispatch }
    }

    /// The process-wide resolver over the standard strategy set.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<ValueResolver> = OnceLock::new();
        SHARED.get_or_init(|| Self::new(StrategyResolver::standard()))
    }

    /// Resolves a nested value: unwraps single-field wrappers, then
    /// dispatches on shape.
    pub fn resolve(&self, value: &dyn Mapped, keys: KeyPreservation) -> PlainValue {
        let value = unwrap_value_object(value);
        self.dispatch.resolve(value).map(value, keys, self)
    }

    /// Resolves a top-level value without unwrapping the receiver itself,
    /// so a wrapper's own field name survives at the root.
    pub fn resolve_root(&self, value: &dyn Mapped, keys: KeyPreservation) -> PlainValue {
        self.dispatch.resolve(value).map(value, keys, self)
    }

    /// Resolves a collection's entries, applying the key policy at this
    /// level.
    ///
    /// Under Preserve, a fully keyless collection stays a dense sequence;
    /// once any entry carries a key, the level becomes a mapping and
    /// keyless entries receive their positional index.
    pub fn resolve_entries(
        &self,
        collection: &dyn CollectionMapped,
        keys: KeyPreservation,
    ) -> PlainValue {
        if keys.should_preserve_keys() {
            let mut keyed = false;
            let mut entries = Vec::with_capacity(collection.entry_len());
            for (index, (key, element)) in collection.entries().enumerate() {
                keyed |= key.is_some();
                let key = key.unwrap_or(MapKey::Int(index as i64));
                entries.push((key, self.resolve(element, keys)));
            }

            if keyed {
                PlainValue::Map(entries.into_iter().collect::<PlainMap>())
            } else {
                PlainValue::Array(entries.into_iter().map(|(_, value)| value).collect())
            }
        } else {
            PlainValue::Array(
                collection
                    .entries()
                    .map(|(_, element)| self.resolve(element, keys))
                    .collect(),
            )
        }
    }
}

impl Default for ValueResolver {
    fn default() -> Self {
        Self::new(StrategyResolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_passthrough_is_terminal() {
        let resolver = ValueResolver::default();
        assert_eq!(
            resolver.resolve(&42i64, KeyPreservation::Preserve),
            PlainValue::Int(42)
        );
        assert_eq!(
            resolver.resolve(&Option::<i64>::None, KeyPreservation::Preserve),
            PlainValue::Null
        );
    }

    #[test]
    fn discard_reindexes_every_level() {
        let resolver = ValueResolver::default();
        let nested: Vec<Vec<i64>> = vec![vec![1, 2], vec![3]];

        let resolved = resolver.resolve(&nested, KeyPreservation::Discard);
        assert_eq!(
            resolved,
            PlainValue::Array(vec![
                PlainValue::Array(vec![PlainValue::Int(1), PlainValue::Int(2)]),
                PlainValue::Array(vec![PlainValue::Int(3)]),
            ])
        );
    }

    #[test]
    fn preserve_keeps_string_keys() {
        let resolver = ValueResolver::default();
        let keyed: std::collections::BTreeMap<String, i64> =
            [("a".to_owned(), 1i64), ("b".to_owned(), 2)].into();

        let PlainValue::Map(map) = resolver.resolve(&keyed, KeyPreservation::Preserve) else {
            panic!("expected a map");
        };
        assert_eq!(map.get("a"), Some(&PlainValue::Int(1)));
        assert_eq!(map.get("b"), Some(&PlainValue::Int(2)));
    }

    struct MixedBag {
        count: i64,
        label: String,
    }

    impl Mapped for MixedBag {
        fn mapped_ref(&self) -> crate::reflection::MappedRef<'_> {
            crate::reflection::MappedRef::Collection(self)
        }
    }

    impl CollectionMapped for MixedBag {
        fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
            Box::new(
                [
                    (None, &self.count as &dyn Mapped),
                    (Some(MapKey::from("label")), &self.label as &dyn Mapped),
                ]
                .into_iter(),
            )
        }

        fn entry_len(&self) -> usize {
            2
        }
    }

    #[test]
    fn preserve_promotes_keyless_entries_to_their_index() {
        let resolver = ValueResolver::default();
        let bag = MixedBag {
            count: 3,
            label: "box".to_owned(),
        };

        let PlainValue::Map(map) = resolver.resolve_entries(&bag, KeyPreservation::Preserve)
        else {
            panic!("expected a map");
        };
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries[0], (&MapKey::Int(0), &PlainValue::Int(3)));
        assert_eq!(
            entries[1],
            (&MapKey::from("label"), &PlainValue::Str("box".to_owned()))
        );
    }

    #[test]
    fn discard_flattens_a_mixed_key_collection() {
        let resolver = ValueResolver::default();
        let bag = MixedBag {
            count: 3,
            label: "box".to_owned(),
        };

        assert_eq!(
            resolver.resolve_entries(&bag, KeyPreservation::Discard),
            PlainValue::Array(vec![
                PlainValue::Int(3),
                PlainValue::Str("box".to_owned()),
            ])
        );
    }

    #[test]
    fn discard_drops_string_keys() {
        let resolver = ValueResolver::default();
        let keyed: std::collections::BTreeMap<String, i64> = [("a".to_owned(), 7i64)].into();

        assert_eq!(
            resolver.resolve(&keyed, KeyPreservation::Discard),
            PlainValue::Array(vec![PlainValue::Int(7)])
        );
    }
}
