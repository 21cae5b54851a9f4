use crate::thumbnail::detect::extract_peertube_id;
use crate::thumbnail::fetchers::settle;
use crate::thumbnail::types::{Platform, ThumbnailResult};
use crate::transport::{FetchError, HttpTransport};
use serde::Deserialize;

const NAME: &str = "PeerTube";

// the videos API does not report thumbnail dimensions
const WIDTH: u32 = 560;
const HEIGHT: u32 = 315;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResponse {
    thumbnail_path: Option<String>,
    preview_path: Option<String>,
}

pub async fn fetch_thumbnail(url: &str, transport: &dyn HttpTransport) -> Option<ThumbnailResult> {
    settle(NAME, url, fetch(url, transport).await)
}

/// Scheme, host and port of the instance serving `url`.
fn instance_origin(url: &str) -> Result<Option<String>, FetchError> {
    let origin = url::Url::parse(url)?.origin();
    if !origin.is_tuple() {
        return Ok(None);
    }
    Ok(Some(origin.ascii_serialization()))
}

async fn fetch(
    url: &str,
    transport: &dyn HttpTransport,
) -> Result<Option<ThumbnailResult>, FetchError> {
    let Some(instance) = instance_origin(url)? else {
        return Ok(None);
    };
    let Some(video_id) = extract_peertube_id(url) else {
        log::debug!("no PeerTube video id in {url}");
        return Ok(None);
    };

    let resp = transport
        .get_json(&format!("{instance}/api/v1/videos/{video_id}"))
        .await?;
    if !resp.ok {
        return Ok(None);
    }

    let video: VideoResponse = serde_json::from_value(resp.body)?;
    let path = video
        .thumbnail_path
        .filter(|p| !p.is_empty())
        .or(video.preview_path.filter(|p| !p.is_empty()));

    Ok(path.map(|path| {
        ThumbnailResult::fresh(format!("{instance}{path}"), WIDTH, HEIGHT, Platform::Peertube)
    }))
}
