//! Adapters - Concrete implementations of ports.

pub mod fs;
pub mod http;
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;
