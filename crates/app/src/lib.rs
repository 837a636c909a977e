//! # sprout-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SensorReader` — fetch a sensor's latest published sample
//!   - `ActuatorGateway` — read/write a hardware channel's boolean state
//!   - `CameraCapture` — grab a still image
//! - Hold the guarded mutable state (`SettingsStore`) shared by the
//!   automation loop and the HTTP handlers
//! - Provide the use-case services the HTTP adapter calls into
//! - Run the automation loop (`ControlLoop`)
//!
//! ## Dependency rule
//! Depends on `sprout-domain` only (plus `tokio::time` for the loop sleep).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod control_loop;
pub mod indicators;
pub mod ports;
pub mod services;
pub mod settings_store;
