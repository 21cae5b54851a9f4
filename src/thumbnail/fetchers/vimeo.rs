use crate::thumbnail::fetchers::settle;
use crate::thumbnail::types::{Platform, ThumbnailResult};
use crate::transport::{FetchError, HttpTransport};
use serde::Deserialize;
use serde_json::Value;

const NAME: &str = "Vimeo";
const OEMBED_ENDPOINT: &str = "https://vimeo.com/api/oembed.json";
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 360;

#[derive(Debug, Deserialize)]
struct OembedResponse {
    thumbnail_url: Option<String>,
    #[serde(default)]
    thumbnail_width: Option<Value>,
    #[serde(default)]
    thumbnail_height: Option<Value>,
}

/// Positive pixel count from an integer, float or numeric string.
/// Anything else counts as missing.
fn dimension(value: Option<&Value>) -> Option<u32> {
    let pixels = match value? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u32::try_from(pixels).ok().filter(|p| *p > 0)
}

pub fn oembed_url(url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("{OEMBED_ENDPOINT}?url={encoded}")
}

pub async fn fetch_thumbnail(url: &str, transport: &dyn HttpTransport) -> Option<ThumbnailResult> {
    settle(NAME, url, fetch(url, transport).await)
}

async fn fetch(
    url: &str,
    transport: &dyn HttpTransport,
) -> Result<Option<ThumbnailResult>, FetchError> {
    let resp = transport.get_json(&oembed_url(url)).await?;
    if !resp.ok {
        return Ok(None);
    }

    let oembed: OembedResponse = serde_json::from_value(resp.body)?;
    Ok(oembed_to_thumbnail(oembed))
}

fn oembed_to_thumbnail(oembed: OembedResponse) -> Option<ThumbnailResult> {
    let thumbnail_url = oembed.thumbnail_url.filter(|u| !u.is_empty())?;

    let width = dimension(oembed.thumbnail_width.as_ref()).unwrap_or(DEFAULT_WIDTH);
    let height = dimension(oembed.thumbnail_height.as_ref()).unwrap_or(DEFAULT_HEIGHT);

    Some(ThumbnailResult::fresh(
        thumbnail_url,
        width,
        height,
        Platform::Vimeo,
    ))
}
