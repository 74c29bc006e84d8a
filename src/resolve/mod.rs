//! The export pipeline: priority-ordered strategy dispatch and the recursive
//! resolution driver.
//!
//! - [`MappingStrategy`] is the per-shape transformer, selected by
//!   `supports` in descending priority order.
//! - [`StrategyResolver`] owns the immutable strategy list.
//! - [`ValueResolver`] drives recursion, wrapper unwrapping and
//!   [`KeyPreservation`](crate::KeyPreservation) handling.

mod resolver;
mod strategy;
mod transform;
mod unwrap;

pub use resolver::{StrategyResolver, ValueResolver};
pub use strategy::{
    CollectionStrategy, DateStrategy, EnumStrategy, MappingStrategy, OpaqueStrategy,
    ScalarStrategy, StructStrategy,
};
pub use transform::{enum_to_plain, format_datetime};
pub use unwrap::unwrap_value_object;
