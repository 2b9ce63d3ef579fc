//! Android device recording through `adb` and the on-device capture instrumentation.

pub mod adb;
pub mod record;
