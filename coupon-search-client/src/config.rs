use getset::Getters;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.sqoot.com/v2";

/// Configuration for [`crate::CouponClient`]
#[derive(Clone, Debug, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[get = "pub"]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the search API; resource paths are joined onto it
    base_url: String,
    /// Sent as `Authorization: api_key <token>` when set
    auth_token: Option<String>,
    /// Whether repeated identical requests are answered from the single fetch cache
    cache_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            cache_enabled: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token,
            ..Default::default()
        }
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}
