//! Application layer - Services that use ports.

pub mod catalog;
pub mod data;
pub mod error;

pub use catalog::{CatalogService, UrlPolicy};
pub use data::VideoDataService;
pub use error::CatalogError;
