//! Deterministic, frame-budgeted gesture replay.

pub mod engine;
pub mod surface;
