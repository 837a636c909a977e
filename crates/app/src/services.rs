//! Use-case services consumed by the HTTP adapter.

pub mod actuator_service;
pub mod controller_service;
pub mod sensor_service;
