//! Client configuration resolved from the environment at startup.

use std::str::FromStr;
use std::time::Duration;

use findthem_types::NonEmptyText;
use reqwest::Url;

/// Default backend address: the development server's bind address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

pub const BASE_URL_VAR: &str = "FINDTHEM_BASE_URL";
pub const TIMEOUT_VAR: &str = "FINDTHEM_TIMEOUT_SECS";
pub const DETAIL_LOOKUP_VAR: &str = "FINDTHEM_DETAIL_LOOKUP";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("base url cannot be empty")]
    EmptyBaseUrl,
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid FINDTHEM_TIMEOUT_SECS value {0:?}: expected a whole number of seconds")]
    InvalidTimeout(String),
    #[error("invalid FINDTHEM_DETAIL_LOOKUP value {0:?}: expected \"scan\" or \"direct\"")]
    InvalidDetailLookup(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// How a single case is looked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailLookup {
    /// Fetch the unfiltered `/search` list and pick the matching id. Works
    /// against every backend, at the cost of transferring all cases.
    #[default]
    ScanSearch,
    /// `GET /persons/{id}`; a 404 means the case does not exist.
    Direct,
}

impl FromStr for DetailLookup {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(DetailLookup::ScanSearch),
            "direct" => Ok(DetailLookup::Direct),
            _ => Err(ClientError::InvalidDetailLookup(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Option<Duration>,
    detail_lookup: DetailLookup,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(
        base_url: NonEmptyText,
        timeout: Option<Duration>,
        detail_lookup: DetailLookup,
    ) -> ClientResult<Self> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let url = Url::parse(base_url.as_str()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        Ok(Self {
            base_url: url,
            timeout,
            detail_lookup,
        })
    }

    /// Load the configuration from `FINDTHEM_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_env_values(
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
            std::env::var(DETAIL_LOOKUP_VAR).ok(),
        )
    }

    /// Resolve the configuration from raw environment values.
    ///
    /// Missing or blank values fall back to the defaults: the local development
    /// server, no client-side timeout, and scan lookup.
    pub fn from_env_values(
        base_url: Option<String>,
        timeout_secs: Option<String>,
        detail_lookup: Option<String>,
    ) -> ClientResult<Self> {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let base_url = present(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = NonEmptyText::new(base_url).map_err(|_| ClientError::EmptyBaseUrl)?;

        let timeout = present(timeout_secs)
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ClientError::InvalidTimeout(v.clone()))
            })
            .transpose()?;

        let detail_lookup = present(detail_lookup)
            .map(|v| v.parse::<DetailLookup>())
            .transpose()?
            .unwrap_or_default();

        Self::new(base_url, timeout, detail_lookup)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn detail_lookup(&self) -> DetailLookup {
        self.detail_lookup
    }

    /// Absolute URL for an endpoint path such as `/search`, keeping any path
    /// prefix of the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
