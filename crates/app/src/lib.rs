//! # heathub-app
//!
//! Application layer: **port definitions** (traits) between the host and
//! device integrations.
//!
//! ## Responsibilities
//! - Define the **exposed capability** a climate integration offers the host:
//!   - `Climate`: read accessors, `update` poll, imperative setters
//! - Define the **integration lifecycle** the host drives:
//!   - `Integration`: setup/discovery, service-call dispatch, teardown
//!
//! ## Dependency rule
//! Depends on `heathub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
