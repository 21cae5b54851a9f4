pub mod config;
pub mod thumbnail;
pub mod transport;
pub mod web;

#[cfg(test)]
mod tests;

pub use thumbnail::{CacheStats, Platform, ThumbnailCache, ThumbnailResult};
