use log::*;
use tas_common::Secret;

pub const DEFAULT_LOYALTY_URL: &str = "http://localhost:9080/loyalty";
pub const DEFAULT_TONE_URL: &str = "http://localhost:9081/tone";
const DEFAULT_UPSTREAM_TIMEOUT: u64 = 10;

/// Where to find the loyalty rule service and the tone analyzer, and how to authenticate against them.
///
/// Both services speak basic auth; an empty user name means requests go out unauthenticated, which is how the
/// services run in development.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub loyalty_url: String,
    pub loyalty_user: String,
    pub loyalty_password: Secret<String>,
    pub tone_url: String,
    pub tone_user: String,
    pub tone_password: Secret<String>,
    /// Request timeout for both services, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            loyalty_url: DEFAULT_LOYALTY_URL.to_string(),
            loyalty_user: String::new(),
            loyalty_password: Secret::default(),
            tone_url: DEFAULT_TONE_URL.to_string(),
            tone_user: String::new(),
            tone_password: Secret::default(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

impl UpstreamConfig {
    pub fn from_env_or_default() -> Self {
        let loyalty_url = std::env::var("TAS_LOYALTY_URL").unwrap_or_else(|_| {
            warn!("TAS_LOYALTY_URL not set. Using the default, {DEFAULT_LOYALTY_URL}");
            DEFAULT_LOYALTY_URL.to_string()
        });
        let loyalty_user = std::env::var("TAS_LOYALTY_USER").unwrap_or_default();
        let loyalty_password = Secret::new(std::env::var("TAS_LOYALTY_PASSWORD").unwrap_or_default());
        let tone_url = std::env::var("TAS_TONE_URL").unwrap_or_else(|_| {
            warn!("TAS_TONE_URL not set. Using the default, {DEFAULT_TONE_URL}");
            DEFAULT_TONE_URL.to_string()
        });
        let tone_user = std::env::var("TAS_TONE_USER").unwrap_or_default();
        let tone_password = Secret::new(std::env::var("TAS_TONE_PASSWORD").unwrap_or_default());
        let timeout_secs = std::env::var("TAS_UPSTREAM_TIMEOUT")
            .map(|s| {
                s.parse::<u64>().unwrap_or_else(|e| {
                    error!("Invalid TAS_UPSTREAM_TIMEOUT ({e}). Using the default, {DEFAULT_UPSTREAM_TIMEOUT}s.");
                    DEFAULT_UPSTREAM_TIMEOUT
                })
            })
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT);
        Self { loyalty_url, loyalty_user, loyalty_password, tone_url, tone_user, tone_password, timeout_secs }
    }
}
