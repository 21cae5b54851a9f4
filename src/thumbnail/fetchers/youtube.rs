use crate::thumbnail::detect::extract_youtube_id;
use crate::thumbnail::fetchers::settle;
use crate::thumbnail::types::{Platform, ThumbnailResult};
use crate::transport::{FetchError, HttpTransport};

const NAME: &str = "YouTube";

/// Static thumbnails, best quality first: (file, width, height).
const CANDIDATES: [(&str, u32, u32); 3] = [
    ("maxresdefault.jpg", 1280, 720),
    ("hqdefault.jpg", 480, 360),
    ("mqdefault.jpg", 320, 180),
];

pub async fn fetch_thumbnail(url: &str, transport: &dyn HttpTransport) -> Option<ThumbnailResult> {
    settle(NAME, url, fetch(url, transport).await)
}

async fn fetch(
    url: &str,
    transport: &dyn HttpTransport,
) -> Result<Option<ThumbnailResult>, FetchError> {
    let Some(video_id) = extract_youtube_id(url) else {
        log::debug!("no YouTube video id in {url}");
        return Ok(None);
    };

    for (file, width, height) in CANDIDATES {
        let image_url = format!("https://img.youtube.com/vi/{video_id}/{file}");

        match transport.head(&image_url).await {
            Ok(true) => {
                return Ok(Some(ThumbnailResult::fresh(
                    image_url,
                    width,
                    height,
                    Platform::Youtube,
                )))
            }
            Ok(false) => log::debug!("{image_url}: not available, trying next"),
            Err(e) => log::debug!("{image_url}: probe failed ({e}), trying next"),
        }
    }

    Ok(None)
}
