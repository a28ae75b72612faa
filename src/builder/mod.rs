//! Fluent construction for filters.
//!
//! [`FilterBuilder`] uses the type-state pattern so a filter cannot be built
//! without a size and a hash count. [`FilterConfig`] carries the same shape
//! as a plain value.
//!
//! - **Compile-time errors**: missing size or hash count
//! - **Runtime errors**: invalid values, reported by `build()`

pub mod filter;

pub use filter::{Complete, FilterBuilder, FilterConfig, Initial, WithSize};
