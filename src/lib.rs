//! Vidcat - Video Catalog Service
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (videos, likes, users)
//! - ports/: Trait definitions (video repository, payload storage)
//! - adapters/: Concrete implementations (in-memory, Redis, filesystem, HTTP)
//! - application/: Catalog and payload services
//! - config: Environment configuration
//!
//! # Features
//! - `redis`: Redis-backed video repository (enabled by default)

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use application::{CatalogError, CatalogService, UrlPolicy, VideoDataService};
pub use config::CatalogConfig;
pub use domain::{NewVideo, Video, VideoId};
