use std::time::Duration;

use futures_util::StreamExt;
use launchfeed_logging::{feed_debug, feed_trace};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::{FailureKind, FetchError, LaunchRecord};

/// Public SpaceX v3 launches collection.
pub const DEFAULT_ENDPOINT: &str = "https://api.spacexdata.com/v3/launches";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Launches collection URL; pages are `?limit=&offset=`, details `/<flight_number>`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait LaunchApi: Send + Sync {
    /// Fetch up to `limit` launches starting at `offset`.
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<LaunchRecord>, FetchError>;

    /// Fetch the full record of a single launch.
    async fn fetch_launch(&self, flight_number: u32) -> Result<LaunchRecord, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLaunchApi {
    settings: FetchSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestLaunchApi {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{endpoint} cannot carry a path"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn page_url(&self, offset: u32, limit: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    pub fn launch_url(&self, flight_number: u32) -> Url {
        let mut url = self.endpoint.clone();
        // `new` rejected cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&flight_number.to_string());
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        feed_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        feed_trace!("Received {} bytes", body.len());

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Malformed, err.to_string()))
    }
}

#[async_trait::async_trait]
impl LaunchApi for ReqwestLaunchApi {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<LaunchRecord>, FetchError> {
        self.get_json(self.page_url(offset, limit)).await
    }

    async fn fetch_launch(&self, flight_number: u32) -> Result<LaunchRecord, FetchError> {
        self.get_json(self.launch_url(flight_number)).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Malformed, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{FetchSettings, ReqwestLaunchApi};
    use crate::FailureKind;

    fn api(endpoint: &str) -> ReqwestLaunchApi {
        ReqwestLaunchApi::new(FetchSettings {
            endpoint: endpoint.to_string(),
            ..FetchSettings::default()
        })
        .expect("api")
    }

    #[test]
    fn page_url_carries_limit_and_offset() {
        let url = api("https://api.example.com/v3/launches").page_url(28, 14);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/launches?limit=14&offset=28"
        );
    }

    #[test]
    fn launch_url_appends_flight_number() {
        assert_eq!(
            api("https://api.example.com/v3/launches")
                .launch_url(5)
                .as_str(),
            "https://api.example.com/v3/launches/5"
        );
        assert_eq!(
            api("https://api.example.com/v3/launches/")
                .launch_url(5)
                .as_str(),
            "https://api.example.com/v3/launches/5"
        );
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = ReqwestLaunchApi::new(FetchSettings {
            endpoint: "not a url".to_string(),
            ..FetchSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
