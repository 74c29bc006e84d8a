use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::MapError;
use crate::info::{CollectionInfo, GenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
use crate::reflection::{CollectionMapped, FromPlain, Mapped, MappedRef};
use crate::value::{MapKey, PlainValue};

// -----------------------------------------------------------------------------
// LazySeq

/// A sequence whose elements are produced on first access.
///
/// The drain-to-sequence operation runs at most once; after that the
/// elements are served from storage. On import, iterable input becomes an
/// element-wise sequence and any other input becomes a single-element
/// sequence, so casting into a `LazySeq` parameter never fails on shape.
///
/// # Examples
///
/// ```
/// use plainmap::LazySeq;
///
/// let seq = LazySeq::new(|| vec![1, 2, 3]);
/// assert_eq!(seq.items(), &[1, 2, 3]);
/// ```
pub struct LazySeq<T> {
    source: Mutex<Option<Box<dyn FnOnce() -> Vec<T> + Send>>>,
    items: OnceLock<Vec<T>>,
}

impl<T> LazySeq<T> {
    /// Creates a sequence from a producer, run on first access.
    pub fn new(source: impl FnOnce() -> Vec<T> + Send + 'static) -> Self {
        Self {
            source: Mutex::new(Some(Box::new(source))),
            items: OnceLock::new(),
        }
    }

    /// Creates an already-drained sequence.
    pub fn ready(items: Vec<T>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(items);
        Self {
            source: Mutex::new(None),
            items: cell,
        }
    }

    /// Returns the elements, draining the producer on first call.
    pub fn items(&self) -> &[T] {
        self.items.get_or_init(|| {
            let source = self
                .source
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match source {
                Some(produce) => produce(),
                None => Vec::new(),
            }
        })
    }

    /// Returns the number of elements, draining if necessary.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// An iterator over the elements, draining if necessary.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items().iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazySeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items.get() {
            Some(items) => f.debug_tuple("LazySeq").field(items).finish(),
            None => f.write_str("LazySeq(<pending>)"),
        }
    }
}

impl<T: 'static> Typed for LazySeq<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Collection(CollectionInfo::new::<Self, T>()))
    }
}

impl<T: Mapped> Mapped for LazySeq<T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for LazySeq<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(self.iter().map(|element| (None, element as &dyn Mapped)))
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for LazySeq<T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        let items = match value {
            PlainValue::Array(elements) => elements
                .into_iter()
                .map(T::from_plain)
                .collect::<Result<_, _>>()?,
            PlainValue::Map(map) => map
                .into_values()
                .map(T::from_plain)
                .collect::<Result<_, _>>()?,
            other => vec![T::from_plain(other)?],
        };
        Ok(Self::ready(items))
    }
}

// -----------------------------------------------------------------------------
// ArrayCursor

/// An indexable cursor over an in-memory sequence.
///
/// Keeps a read position alongside the elements, so consumers can walk the
/// sequence without owning an iterator borrow.
#[derive(Debug)]
pub struct ArrayCursor<T> {
    items: Vec<T>,
    position: AtomicUsize,
}

impl<T> ArrayCursor<T> {
    /// Creates a cursor at position 0.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            position: AtomicUsize::new(0),
        }
    }

    /// Returns the element at the given index, without moving the cursor.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the element under the cursor, then advances past it.
    pub fn advance(&self) -> Option<&T> {
        let index = self.position.fetch_add(1, Ordering::Relaxed);
        self.items.get(index)
    }

    /// Resets the cursor to position 0.
    pub fn rewind(&self) {
        self.position.store(0, Ordering::Relaxed);
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cursor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// An iterator over all elements, independent of the cursor position.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the cursor, returning the elements.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: 'static> Typed for ArrayCursor<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Collection(CollectionInfo::new::<Self, T>()))
    }
}

impl<T: Mapped> Mapped for ArrayCursor<T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Collection(self)
    }
}

impl<T: Mapped> CollectionMapped for ArrayCursor<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Option<MapKey>, &dyn Mapped)> + '_> {
        Box::new(self.iter().map(|element| (None, element as &dyn Mapped)))
    }

    fn entry_len(&self) -> usize {
        self.len()
    }
}

impl<T: FromPlain> FromPlain for ArrayCursor<T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        Vec::<T>::from_plain(value).map(Self::new)
    }
}

// -----------------------------------------------------------------------------
// Thunk

/// A deferred-access wrapper around a cast value.
///
/// On export a thunk has no structural representation and resolves to an
/// empty sequence; the wrapped value is reachable only through [`get`].
///
/// [`get`]: Thunk::get
#[derive(Debug, Clone, PartialEq)]
pub struct Thunk<T>(T);

impl<T> Thunk<T> {
    /// Wraps a value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Consumes the thunk, returning the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: 'static> Typed for Thunk<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl<T: Send + Sync> Mapped for Thunk<T> {
    #[inline]
    fn mapped_ref(&self) -> MappedRef<'_> {
        MappedRef::Opaque
    }
}

impl<T: FromPlain> FromPlain for Thunk<T> {
    fn from_plain(value: PlainValue) -> Result<Self, MapError> {
        T::from_plain(value).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_seq_drains_once() {
        let seq = LazySeq::new(|| vec![1i64, 2]);
        assert_eq!(seq.items(), &[1, 2]);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn lazy_seq_wraps_non_iterable_input() {
        let seq = LazySeq::<i64>::from_plain(PlainValue::Int(7)).unwrap();
        assert_eq!(seq.items(), &[7]);
    }

    #[test]
    fn lazy_seq_spreads_iterable_input() {
        let input = PlainValue::Array(vec![PlainValue::Int(1), PlainValue::Int(2)]);
        let seq = LazySeq::<i64>::from_plain(input).unwrap();
        assert_eq!(seq.items(), &[1, 2]);
    }

    #[test]
    fn cursor_walks_and_rewinds() {
        let cursor = ArrayCursor::new(vec!["a", "b"]);
        assert_eq!(cursor.advance(), Some(&"a"));
        assert_eq!(cursor.advance(), Some(&"b"));
        assert_eq!(cursor.advance(), None);

        cursor.rewind();
        assert_eq!(cursor.advance(), Some(&"a"));
    }

    #[test]
    fn wrappers_carry_their_own_descriptors() {
        let seq_info = LazySeq::<i64>::type_info().as_collection().unwrap();
        assert_eq!(seq_info.element().path(), "i64");

        let cursor_info = ArrayCursor::<String>::type_info().as_collection().unwrap();
        assert_eq!(cursor_info.element().name(), "String");

        assert!(Thunk::<i64>::type_info().as_collection().is_none());
        assert_ne!(
            Thunk::<i64>::type_info().ty().id(),
            Thunk::<String>::type_info().ty().id()
        );
    }

    #[test]
    fn thunk_wraps_cast_value() {
        let thunk = Thunk::<i64>::from_plain(PlainValue::Int(5)).unwrap();
        assert_eq!(*thunk.get(), 5);
        assert!(matches!(thunk.mapped_ref(), MappedRef::Opaque));
    }
}
