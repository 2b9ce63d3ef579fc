//! Capture side: the rendering collaborator contract, frame sinks and the per-scenario session.

pub mod host;
pub mod session;
pub mod sink;
