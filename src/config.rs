use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "PawCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend for both the REST API and the inference service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Embedded listing images must be strictly smaller than this (1 MiB).
pub const MAX_EMBEDDED_IMAGE_BYTES: usize = 1024 * 1024;

/// How long the booking confirmation stays up before returning home.
pub const BOOKING_CONFIRMATION: Duration = Duration::from_secs(3);

/// How long the listing confirmation stays up before returning home.
pub const LISTING_CONFIRMATION: Duration = Duration::from_secs(2);

/// Image used for listings submitted without one.
pub const PLACEHOLDER_DOG_IMAGE: &str =
    "https://images.unsplash.com/photo-1543466835-00a7907e9de1?w=400&h=300&fit=crop";

const ENV_API_URL: &str = "PAWCARE_API_URL";
const ENV_INFERENCE_URL: &str = "PAWCARE_INFERENCE_URL";
const ENV_HTTP_TIMEOUT: &str = "PAWCARE_HTTP_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pawcare=info,pawcare_lib=info,warn"
}

/// Endpoints and transport settings for the HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub inference_base_url: String,
    /// `None` keeps the transport's own default.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Build from `PAWCARE_*` environment variables, falling back to localhost.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let inference_base_url = lookup(ENV_INFERENCE_URL)
            .filter(|v| !v.trim().is_empty())
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(|| api_base_url.clone());

        let request_timeout = lookup(ENV_HTTP_TIMEOUT).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid {ENV_HTTP_TIMEOUT}");
                    None
                }
            }
        });

        Self {
            api_base_url,
            inference_base_url,
            request_timeout,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            inference_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// Strip surrounding whitespace and trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
