//! Environment-backed configuration.

use thiserror::Error;
use tracing::warn;
use url::Url;

// ============================================================================
// Config (root)
// ============================================================================

/// Runtime configuration, read from the environment.
///
/// Each relay half has its own optional section. A missing section
/// disables that half with a logged refusal instead of failing the whole
/// process; only malformed values are hard errors.
#[derive(Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub webhook: Option<WebhookConfig>,
    pub gateway: Option<GatewayConfig>,
    pub store: Option<StoreConfig>,
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an injectable lookup. Unset and empty values are
    /// treated alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(default_host),
            port: parse_number(get("PORT"), "PORT", default_port())?,
            request_timeout_seconds: parse_number(
                get("REQUEST_TIMEOUT_SECONDS"),
                "REQUEST_TIMEOUT_SECONDS",
                default_request_timeout(),
            )?,
            shutdown_grace_seconds: parse_number(
                get("SHUTDOWN_GRACE_SECONDS"),
                "SHUTDOWN_GRACE_SECONDS",
                default_shutdown_grace(),
            )?,
        };

        let webhook = get("DISCORD_WEBHOOK_URL")
            .map(|raw| parse_url(&raw, "DISCORD_WEBHOOK_URL"))
            .transpose()?
            .map(|url| WebhookConfig {
                url,
                avatar_url: get("BRIDGE_AVATAR_URL"),
            });

        let gateway = match (get("DISCORD_BOT_TOKEN"), get("DISCORD_CHANNEL_ID")) {
            (Some(token), Some(channel)) => {
                let channel_id = channel.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                    key: "DISCORD_CHANNEL_ID",
                    value: channel,
                })?;
                Some(GatewayConfig { token, channel_id })
            }
            (Some(_), None) => {
                warn!("DISCORD_BOT_TOKEN is set but DISCORD_CHANNEL_ID is missing");
                None
            }
            (None, Some(_)) => {
                warn!("DISCORD_CHANNEL_ID is set but DISCORD_BOT_TOKEN is missing");
                None
            }
            (None, None) => None,
        };

        let store = get("FIREBASE_DATABASE_URL")
            .map(|raw| parse_url(&raw, "FIREBASE_DATABASE_URL"))
            .transpose()?
            .map(|database_url| StoreConfig {
                database_url,
                auth_token: get("FIREBASE_AUTH_TOKEN"),
            });

        Ok(Self {
            server,
            webhook,
            gateway,
            store,
        })
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bound for the HTTP request layer and both downstream calls.
    pub request_timeout_seconds: u64,
    /// How long shutdown waits for the gateway task to drain.
    pub shutdown_grace_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_shutdown_grace() -> u64 {
    10
}

// ============================================================================
// Relay halves
// ============================================================================

/// Outbound half: platform webhook endpoint.
#[derive(Debug)]
pub struct WebhookConfig {
    pub url: Url,
    pub avatar_url: Option<String>,
}

/// Inbound half: platform subscription identity and target channel.
#[derive(Debug)]
pub struct GatewayConfig {
    pub token: String,
    pub channel_id: u64,
}

/// Inbound half: store endpoint for appends.
#[derive(Debug)]
pub struct StoreConfig {
    pub database_url: Url,
    pub auth_token: Option<String>,
}

// ============================================================================
// ConfigError
// ============================================================================

/// Operator-correctable configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} is not a number")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid URL in {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_number<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_url(raw: &str, key: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source })
}

// ============================================================================
// Tests
// ============================================================================
