//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the host and the outside world. They are
//! defined here (in `app`) so that both the host and the adapter layer can
//! depend on them without creating circular dependencies.

pub mod climate;
pub mod integration;

pub use climate::Climate;
pub use integration::{DiscoveredDevice, Integration};
