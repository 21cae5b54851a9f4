use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Vimeo,
    Peertube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Vimeo => "vimeo",
            Platform::Peertube => "peertube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A displayable thumbnail for a video page.
///
/// `cached` is stamped on every read: false when the result was just fetched,
/// true when it was served from [`ThumbnailCache`](super::ThumbnailCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailResult {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub platform: Platform,
    pub cached: bool,
}

impl ThumbnailResult {
    pub fn fresh(url: impl Into<String>, width: u32, height: u32, platform: Platform) -> Self {
        ThumbnailResult {
            url: url.into(),
            width,
            height,
            platform,
            cached: false,
        }
    }

    /// Copy of this result marked as served from cache.
    pub fn as_cached(&self) -> Self {
        ThumbnailResult {
            cached: true,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serializes_lowercase() {
        let result = ThumbnailResult::fresh("https://x/t.jpg", 560, 315, Platform::Peertube);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["platform"], "peertube");
        assert_eq!(json["cached"], false);
        assert_eq!(Platform::Youtube.to_string(), "youtube");
    }

    #[test]
    fn test_as_cached_keeps_payload() {
        let fresh = ThumbnailResult::fresh("https://x/t.jpg", 640, 360, Platform::Vimeo);
        let cached = fresh.as_cached();

        assert!(cached.cached);
        assert!(!fresh.cached);
        assert_eq!(cached.url, fresh.url);
        assert_eq!((cached.width, cached.height), (640, 360));
    }
}
