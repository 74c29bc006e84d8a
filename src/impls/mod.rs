//! Mapping impls for primitives, `Option`, standard collections, chrono
//! date/time types and the wrapper types ([`LazySeq`], [`ArrayCursor`],
//! [`Thunk`]) this crate provides.

mod collections;
mod datetime;
mod option;
mod plain;
mod scalar;
mod wrappers;

pub use wrappers::{ArrayCursor, LazySeq, Thunk};
