//! Configuration & types
//!
//! Shared error taxonomy and optional process settings.

pub mod settings;
pub mod types;
