//! The traits participating types implement (usually via
//! [`#[derive(Mapped)]`](crate::derive::Mapped)).
//!
//! - [`Mapped`] classifies a runtime value into a [`MappedRef`] kind; the
//!   export pipeline dispatches on it.
//! - [`StructMapped`], [`EnumMapped`] and [`CollectionMapped`] are the
//!   kind-specific access subtraits.
//! - [`FromPlain`] reconstructs a typed value from plain input; it is the
//!   import pipeline's per-declared-type caster.
//! - [`Constructible`] exposes the generated constructor descriptor.
//! - [`Collectible`] is the capability collection types opt into.
//! - [`Mapper`] is the public facade, blanket-implemented for every
//!   [`Mapped`] type.

mod from_plain;
mod mapped;
mod mapper;

pub use from_plain::{Collectible, Constructible, FromPlain};
pub use mapped::{CollectionMapped, EnumMapped, Mapped, MappedKind, MappedRef, Scalar, StructMapped};
pub use mapper::Mapper;
