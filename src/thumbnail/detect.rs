use crate::thumbnail::types::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

static YOUTUBE_ID_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?:watch\?v=|youtu\.be/|/embed/)([^&?/]+)")
            .expect("Failed to compile YouTube watch regex"),
        Regex::new(r"/v/([^&?/]+)").expect("Failed to compile YouTube /v/ regex"),
        Regex::new(r"/shorts/([^&?/]+)").expect("Failed to compile YouTube shorts regex"),
    ]
});

static PEERTUBE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(?:videos/watch|w)/([A-Za-z0-9-]{1,36})")
        .expect("Failed to compile PeerTube regex")
});

/// Classify a video page URL. Never fails; anything unknown is `None`.
pub fn detect(url: &str) -> Option<Platform> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str().unwrap_or_default().to_lowercase();

    if host.contains("youtube.com") || host.contains("youtu.be") {
        return Some(Platform::Youtube);
    }

    if host.contains("vimeo.com") {
        return Some(Platform::Vimeo);
    }

    // self-hosted instances have no fixed domain, match the raw path instead
    if url.contains("/videos/watch/") || url.contains("/w/") {
        return Some(Platform::Peertube);
    }

    None
}

pub fn extract_youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
}

pub fn extract_peertube_id(url: &str) -> Option<String> {
    PEERTUBE_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
}
