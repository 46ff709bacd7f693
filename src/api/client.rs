use reqwest::Url;
use tracing::debug;

use super::error::ApiError;
use crate::config::Config;
use crate::state::data::EnrichedPhoto;
use crate::state::query::PhotoQuery;

/// HTTP client for the photo API.
///
/// Cheap to clone: `reqwest::Client` shares its connection pool internally,
/// so each background task gets its own handle.
#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    photos_url: Url,
}

impl PhotoClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Self::with_http(http, &config.api_url)
    }

    fn with_http(http: reqwest::Client, api_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            photos_url: photos_url(api_url)?,
        })
    }

    /// Endpoint every list request goes to
    pub fn photos_url(&self) -> &Url {
        &self.photos_url
    }

    /// Build (but don't send) the list request for `query`
    pub fn photos_request(&self, query: &PhotoQuery) -> Result<reqwest::Request, ApiError> {
        let request = self
            .http
            .get(self.photos_url.clone())
            .query(&query.pairs())
            .build()?;
        Ok(request)
    }

    /// Fetch one page of photos. The server's order is preserved.
    pub async fn fetch_photos(&self, query: &PhotoQuery) -> Result<Vec<EnrichedPhoto>, ApiError> {
        let request = self.photos_request(query)?;
        debug!(url = %request.url(), "GET photos");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let photos = response.json::<Vec<EnrichedPhoto>>().await?;
        debug!(count = photos.len(), "photos received");
        Ok(photos)
    }

    /// Download the raw bytes behind a thumbnail URL
    pub async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// `<base>/photos`, ignoring a trailing slash on the base
fn photos_url(base: &str) -> Result<Url, ApiError> {
    let joined = format!("{}/photos", base.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| ApiError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })
}
