//! Business logic services for the NWT Climate Explorer

pub mod dataset;
pub mod explorer;
pub mod prep;

pub use dataset::DatasetLoader;
pub use explorer::ExplorerService;
pub use prep::PrepService;
