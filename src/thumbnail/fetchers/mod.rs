pub mod peertube;
pub mod vimeo;
pub mod youtube;

use crate::thumbnail::types::{Platform, ThumbnailResult};
use crate::transport::{FetchError, HttpTransport};

/// Run the fetcher for `platform`. Errors are logged and collapse to `None`.
pub async fn fetch_thumbnail(
    platform: Platform,
    url: &str,
    transport: &dyn HttpTransport,
) -> Option<ThumbnailResult> {
    match platform {
        Platform::Youtube => youtube::fetch_thumbnail(url, transport).await,
        Platform::Vimeo => vimeo::fetch_thumbnail(url, transport).await,
        Platform::Peertube => peertube::fetch_thumbnail(url, transport).await,
    }
}

/// Fetcher boundary: log the outcome and drop the error.
fn settle(
    name: &str,
    url: &str,
    outcome: Result<Option<ThumbnailResult>, FetchError>,
) -> Option<ThumbnailResult> {
    match outcome {
        Ok(Some(result)) => {
            log::info!(
                "fetcher={name} outcome=success url={url} thumbnail={} size={}x{}",
                result.url,
                result.width,
                result.height
            );
            Some(result)
        }
        Ok(None) => {
            log::info!("fetcher={name} outcome=skip url={url}");
            None
        }
        Err(e) => {
            log::warn!("fetcher={name} outcome=error url={url} err={e}");
            None
        }
    }
}
