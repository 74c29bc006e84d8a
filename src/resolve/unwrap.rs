use crate::reflection::{Mapped, MappedRef};

/// Unwraps single-field wrapper structs to arbitrary depth.
///
/// A wrapper is a struct with exactly one field; the wrapped value replaces
/// it and the check repeats until the value is no longer a single-field
/// struct. Enums and every other kind are terminal. Wrapper detection is by
/// field count, with field 0 as the wrapped value.
pub fn unwrap_value_object(value: &dyn Mapped) -> &dyn Mapped {
    let mut current = value;
    loop {
        let MappedRef::Struct(inner) = current.mapped_ref() else {
            return current;
        };
        if inner.field_len() != 1 {
            return current;
        }
        match inner.field_at(0) {
            Some(wrapped) => current = wrapped,
            None => return current,
        }
    }
}
