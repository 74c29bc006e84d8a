//! The import pipeline: constructor-argument casting and instantiation.

mod builder;

pub use builder::{ArgumentPolicy, ObjectBuilder};
