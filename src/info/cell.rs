use std::any::TypeId;
use std::sync::{PoisonError, RwLock};

use crate::info::TypeInfo;

/// Static storage of [`TypeInfo`] for generic types.
///
/// A `static` inside a generic function is shared across every
/// instantiation, so this cell keys each entry by [`TypeId`]. Entries are
/// leaked once; the set of described types is fixed at compile time.
///
/// Non-generic types don't need this, a plain `OnceLock<TypeInfo>` suffices.
pub struct GenericTypeInfoCell {
    entries: RwLock<Vec<(TypeId, &'static TypeInfo)>>,
}

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns the stored [`TypeInfo`] for `T`, running `init` on first
    /// access.
    pub fn get_or_insert<T: 'static>(
        &self,
        init: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let id = TypeId::of::<T>();

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(info) = lookup(&entries, id) {
                return info;
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // A racing writer may have inserted between the two locks.
        if let Some(info) = lookup(&entries, id) {
            return info;
        }

        let info: &'static TypeInfo = Box::leak(Box::new(init()));
        entries.push((id, info));
        info
    }
}

impl Default for GenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(entries: &[(TypeId, &'static TypeInfo)], id: TypeId) -> Option<&'static TypeInfo> {
    entries
        .iter()
        .find(|(entry, _)| *entry == id)
        .map(|(_, info)| *info)
}

#[cfg(test)]
mod tests {
    use super::GenericTypeInfoCell;
    use crate::info::{OpaqueInfo, TypeInfo};

    #[test]
    fn entries_are_keyed_by_instantiation() {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();

        fn info_of<T: 'static>() -> &'static TypeInfo {
            CELL.get_or_insert::<T>(|| TypeInfo::Opaque(OpaqueInfo::new::<T>()))
        }

        let ints = info_of::<i64>();
        let strings = info_of::<String>();

        assert_ne!(ints.ty().id(), strings.ty().id());
        assert!(std::ptr::eq(ints, info_of::<i64>()));
    }
}
