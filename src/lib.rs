//! pom-bridge
//!
//! Umbrella package over [`pom_bridge_core`]; hosts the workspace integration tests.

pub use pom_bridge_core::*;
