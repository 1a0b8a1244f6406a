#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Vellum crates.
//!
//! - [`Value`]: the JSON-like value produced by rendering
//! - [`Colors`]: ANSI palette used by the text printers
//! - [`utils`]: text helpers for fragment normalization

mod colors;
pub mod utils;
mod value;

#[cfg(test)]
mod utils_tests;
#[cfg(test)]
mod value_tests;

pub use colors::Colors;
pub use value::Value;
