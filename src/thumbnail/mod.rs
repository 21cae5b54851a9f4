pub mod cache;
pub mod detect;
pub mod fetchers;
pub mod types;

pub use cache::{ThumbnailCache, CACHE_TTL};
pub use detect::{detect, extract_youtube_id};
pub use fetchers::fetch_thumbnail;
pub use types::{CacheStats, Platform, ThumbnailResult};
