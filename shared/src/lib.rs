//! Shared types and models for the NWT Climate Explorer
//!
//! This crate contains the domain model and the filter/aggregate/plot
//! pipeline shared between the backend, the browser (via WASM), and the
//! data preparation tooling.

pub mod chart;
pub mod dataset;
pub mod lookup;
pub mod map;
pub mod models;
pub mod pipeline;
pub mod prep;
pub mod types;
pub mod validation;

pub use dataset::*;
pub use models::*;
pub use types::*;
pub use validation::*;
