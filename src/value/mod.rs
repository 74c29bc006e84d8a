//! The plain data model produced by the export pipeline and consumed by the
//! import pipeline.
//!
//! [`PlainValue`] is a loosely-typed tree of scalars, sequences and
//! insertion-ordered mappings. It is what `to_plain` returns, what the JSON
//! facade renders, and what `from_iterable` reconstructs objects from.

mod ser;

// -----------------------------------------------------------------------------
// KeyPreservation

/// Defines whether associative keys are preserved or discarded during mapping.
///
/// The policy is re-applied independently at every nesting level: under
/// [`Discard`](Self::Discard) every produced level is re-indexed to a dense
/// 0-based sequence, not just the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPreservation {
    /// Keys are discarded; every level becomes a dense sequence.
    Discard,
    /// Keys are preserved at every recursion level.
    #[default]
    Preserve,
}

impl KeyPreservation {
    /// Returns `true` if keys should be preserved.
    #[inline]
    pub const fn should_preserve_keys(self) -> bool {
        matches!(self, Self::Preserve)
    }
}

// -----------------------------------------------------------------------------
// MapKey

/// A key of a [`PlainMap`] entry.
///
/// String keys are always kept as-is; integer keys are kept under
/// [`KeyPreservation::Preserve`] and dropped under
/// [`KeyPreservation::Discard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapKey {
    Int(i64),
    Str(String),
}

impl MapKey {
    /// Returns the key as a string slice, if it is a string key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(key) => Some(key),
            Self::Int(_) => None,
        }
    }
}

impl From<&str> for MapKey {
    #[inline]
    fn from(key: &str) -> Self {
        Self::Str(key.to_owned())
    }
}

impl From<String> for MapKey {
    #[inline]
    fn from(key: String) -> Self {
        Self::Str(key)
    }
}

impl From<i64> for MapKey {
    #[inline]
    fn from(key: i64) -> Self {
        Self::Int(key)
    }
}

impl From<usize> for MapKey {
    #[inline]
    fn from(key: usize) -> Self {
        Self::Int(key as i64)
    }
}

// -----------------------------------------------------------------------------
// PlainValue

/// A plain, loosely-typed value tree.
///
/// Scalars keep their exact type tag through a conversion round-trip; in
/// particular floats stay floats even when mathematically integral, so
/// `100.0` renders as `100.0` and never collapses to `100`.
///
/// # Examples
///
/// ```
/// use plainmap::PlainValue;
///
/// let value = PlainValue::from(3.14);
/// assert!(!value.is_empty());
/// assert_eq!(value, PlainValue::Float(3.14));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Array(Vec<PlainValue>),
    Map(PlainMap),
}

impl PlainValue {
    /// Returns `true` if the value is [`Null`](Self::Null).
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is "empty" in the falsy sense used by the
    /// JSON facade: null, `false`, `0`, `0.0`, the empty string, or an empty
    /// sequence/mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !value,
            Self::Int(value) => *value == 0,
            Self::UInt(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::Str(value) => value.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }

    /// A short name for the value's shape, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Returns the string content, if this is a string value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for PlainValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PlainValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for PlainValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for PlainValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for PlainValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PlainValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PlainValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<PlainValue>> for PlainValue {
    #[inline]
    fn from(items: Vec<PlainValue>) -> Self {
        Self::Array(items)
    }
}

impl From<PlainMap> for PlainValue {
    #[inline]
    fn from(map: PlainMap) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<PlainValue>> From<Option<T>> for PlainValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// PlainMap

/// An insertion-ordered mapping of [`MapKey`]s to [`PlainValue`]s.
///
/// Lookup is linear; the maps produced by the mapper mirror struct field
/// lists and stay small, and preserving insertion order is what matters for
/// deterministic output.
///
/// # Examples
///
/// ```
/// use plainmap::{PlainMap, PlainValue};
///
/// let map: PlainMap = [("id", PlainValue::from(1)), ("name", "Sedan".into())]
///     .into_iter()
///     .collect();
///
/// assert_eq!(map.get("name"), Some(&PlainValue::from("Sedan")));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlainMap {
    entries: Vec<(MapKey, PlainValue)>,
}

impl PlainMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty map with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Into<PlainValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the value for the given string key, if present.
    pub fn get(&self, name: &str) -> Option<&PlainValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == Some(name))
            .map(|(_, value)| value)
    }

    /// Removes and returns the value for the given string key, if present.
    pub fn take(&mut self, name: &str) -> Option<PlainValue> {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| key.as_str() == Some(name))?;
        Some(self.entries.remove(index).1)
    }

    /// An iterator over the entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&MapKey, &PlainValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// An iterator over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &PlainValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Consumes the map, yielding the values in insertion order.
    pub fn into_values(self) -> impl ExactSizeIterator<Item = PlainValue> {
        self.entries.into_iter().map(|(_, value)| value)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<MapKey>, V: Into<PlainValue>> FromIterator<(K, V)> for PlainMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for PlainMap {
    type Item = (MapKey, PlainValue);
    type IntoIter = std::vec::IntoIter<(MapKey, PlainValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{KeyPreservation, PlainMap, PlainValue};

    #[test]
    fn key_preservation_default() {
        assert!(KeyPreservation::default().should_preserve_keys());
        assert!(!KeyPreservation::Discard.should_preserve_keys());
    }

    #[test]
    fn emptiness() {
        assert!(PlainValue::Null.is_empty());
        assert!(PlainValue::Bool(false).is_empty());
        assert!(PlainValue::Int(0).is_empty());
        assert!(PlainValue::Float(0.0).is_empty());
        assert!(PlainValue::Str(String::new()).is_empty());
        assert!(PlainValue::Array(Vec::new()).is_empty());

        assert!(!PlainValue::Bool(true).is_empty());
        assert!(!PlainValue::Float(0.1).is_empty());
        assert!(!PlainValue::from("x").is_empty());
    }

    #[test]
    fn map_preserves_insertion_order() {
        let mut map = PlainMap::new();
        map.insert("b", 1);
        map.insert("a", 2);

        let keys: Vec<_> = map.iter().filter_map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn map_take_removes_entry() {
        let mut map: PlainMap = [("id", 1), ("qty", 2)].into_iter().collect();

        assert_eq!(map.take("id"), Some(PlainValue::Int(1)));
        assert_eq!(map.take("id"), None);
        assert_eq!(map.len(), 1);
    }
}
