//! Scenario data model: capture configuration, gesture primitives, interaction intents and the
//! validator that gates them.

pub mod capture;
pub mod interaction;
pub mod validate;
