//! Interaction compilation and frame-budget arithmetic.

pub mod expand;
pub mod timing;
