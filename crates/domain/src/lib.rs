//! # sprout-domain
//!
//! Pure domain model for the sprout garden controller.
//!
//! ## Responsibilities
//! - Foundational types: sensor readings, settings documents, error conventions
//! - The known-keys merge algorithm used for every settings update
//! - The hysteresis decision function driving the automation loop
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod hysteresis;
pub mod merge;
pub mod reading;
pub mod settings;
pub mod time;
