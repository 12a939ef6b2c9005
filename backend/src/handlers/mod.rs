//! HTTP request handlers

pub mod catalog;
pub mod chart;
pub mod health;
pub mod locations;
pub mod map;
pub mod records;

pub use catalog::*;
pub use chart::*;
pub use health::*;
pub use locations::*;
pub use map::*;
pub use records::*;
