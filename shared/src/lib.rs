//! Shared types and models for the Smart Irrigation System
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system: the sensor domain model, the feature
//! encoding contract, and input validation.

pub mod features;
pub mod models;
pub mod validation;

pub use features::*;
pub use models::*;
pub use validation::*;
