//! Cleanup lifecycle engine
//!
//! Validation, panic-free deletion, lifetime-bound handles, and the
//! exactly-once deferred drain at process exit.

pub mod deleter;
pub mod handle;
pub mod registry;
pub mod shutdown;
pub mod validate;
