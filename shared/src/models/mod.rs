//! Domain models for the NWT Climate Explorer

mod climate;
mod figure;
mod location;
mod selection;

pub use climate::*;
pub use figure::*;
pub use location::*;
pub use selection::*;
