//! # heathub-domain
//!
//! Pure domain model for the heathub climate integration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Entities** (state holders with identity exposed to the host)
//! - Define **Devices** (physical appliances that expose one or more entities)
//! - Define the **climate vocabulary** the host understands (hvac modes,
//!   presets, actions, units, feature flags)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod climate;
pub mod device;
pub mod entity;
