use crate::config::ProxyConfig;
use crate::error::{KefError, Result, TransportCause};
use crate::protocol::SettingValue;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const GET_DATA: &str = "/api/getData";
const SET_DATA: &str = "/api/setData";

/// Request/response channel to one speaker's settings API
///
/// Implementations must bound every call in time and must not keep any
/// session state between calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read a setting; `Ok(None)` when the response carries no data
    async fn get_data(&self, path: &str, role: &str) -> Result<Option<Map<String, Value>>>;

    /// Write a setting
    async fn set_data(&self, path: &str, role: &str, value: &SettingValue) -> Result<()>;

    /// Endpoint reported in errors raised while decoding a read of `path`
    fn read_endpoint(&self, path: &str, role: &str) -> String {
        format!("{}?roles={}", path, role)
    }
}

/// Normalized base URL of a speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAddress {
    base_url: String,
}

impl DeviceAddress {
    /// Normalize a host or URL: `http://` is assumed when no scheme is given and
    /// trailing slashes are stripped.
    pub fn new(host: &str) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(KefError::InvalidArgument("speaker address is empty".to_string()));
        }

        let lower = host.to_ascii_lowercase();
        let mut base_url = if lower.starts_with("http://") || lower.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let parsed = Url::parse(&base_url)
            .map_err(|e| KefError::InvalidArgument(format!("invalid speaker address `{}`: {}", host, e)))?;
        if parsed.host_str().is_none() {
            return Err(KefError::InvalidArgument(format!("speaker address `{}` has no host", host)));
        }

        Ok(Self { base_url })
    }

    pub fn as_str(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, api: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, api);
        Url::parse_with_params(&raw, params)
            .map_err(|e| KefError::transport(raw.clone(), TransportCause::InvalidUrl(e.to_string())))
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

/// [`Transport`] over the speaker's local HTTP API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    address: DeviceAddress,
    client: Client,
    timeout: Duration,
    debug_enabled: bool,
}

impl HttpTransport {
    pub fn new(address: DeviceAddress, config: &ProxyConfig) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(KefError::InvalidArgument("request timeout must be non-zero".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| KefError::transport(address.as_str(), e))?;

        Ok(Self {
            address,
            client,
            timeout: config.timeout,
            debug_enabled: config.debug_enabled,
        })
    }

    /// Perform one GET and decode the body as JSON
    #[instrument(skip(self, params), fields(device = %self.address))]
    async fn request(&self, api: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.address.endpoint(api, params)?;
        let endpoint = url.to_string();
        debug!(%endpoint, "HTTP GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.http_failure(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%endpoint, status = status.as_u16(), "Speaker returned error status");
            return Err(KefError::transport(endpoint, TransportCause::Status(status.as_u16())));
        }

        debug!(%endpoint, status = status.as_u16(), "HTTP GET ok");

        // Parsed from raw bytes so invalid UTF-8 fails instead of being replaced
        let body = response.bytes().await.map_err(|e| self.http_failure(&endpoint, e))?;
        if self.debug_enabled {
            debug!(%endpoint, body = %String::from_utf8_lossy(&body), "Raw response");
        }

        match serde_json::from_slice(&body) {
            Ok(json) => Ok(json),
            Err(e) => {
                warn!(
                    %endpoint,
                    error = %e,
                    body = %String::from_utf8_lossy(&body),
                    "Invalid JSON from speaker"
                );
                Err(KefError::transport(endpoint, e))
            }
        }
    }

    fn http_failure(&self, endpoint: &str, e: reqwest::Error) -> KefError {
        warn!(%endpoint, error = %e, "HTTP GET failed");
        if e.is_timeout() {
            KefError::transport(endpoint, TransportCause::Timeout(self.timeout))
        } else {
            KefError::transport(endpoint, e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_data(&self, path: &str, role: &str) -> Result<Option<Map<String, Value>>> {
        let json = self.request(GET_DATA, &[("path", path), ("roles", role)]).await?;
        let element = first_element(json);
        if element.is_none() {
            debug!(path, "Response is not an array of objects, treating as no data");
        }
        Ok(element)
    }

    fn read_endpoint(&self, path: &str, role: &str) -> String {
        match self.address.endpoint(GET_DATA, &[("path", path), ("roles", role)]) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.address, GET_DATA),
        }
    }

    async fn set_data(&self, path: &str, role: &str, value: &SettingValue) -> Result<()> {
        let envelope = value
            .to_envelope()
            .map_err(|cause| KefError::transport(format!("{}{}", self.address, SET_DATA), cause))?;
        self.request(SET_DATA, &[("path", path), ("roles", role), ("value", envelope.as_str())])
            .await?;
        Ok(())
    }
}

/// First element of a `getData` response, if the response has the expected shape
pub(crate) fn first_element(json: Value) -> Option<Map<String, Value>> {
    match json {
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::Object(element)) => Some(element),
            _ => None,
        },
        _ => None,
    }
}
