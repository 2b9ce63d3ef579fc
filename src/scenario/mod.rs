//! Scenario declaration and lookup: the JSON manifest and the immutable registry built from it.

pub mod manifest;
pub mod registry;
