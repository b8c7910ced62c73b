//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;

use chrono::FixedOffset;

/// Largest accepted offset from UTC, in minutes.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP API.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Human-readable name for this instance.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Parley"`
    pub instance_name: String,

    /// Maximum request body size in bytes.
    /// Env: `MAX_BODY_BYTES`
    /// Default: 1 MiB
    pub max_body_bytes: usize,

    /// Zone used to render times when a request does not name one, as
    /// minutes east of UTC.
    /// Env: `TZ_OFFSET_MINUTES`
    /// Default: unset, so each request renders in the host's local zone as
    /// of that request.
    pub tz_offset_minutes: Option<i32>,

    /// Fill the in-memory store with a few sample conversations on start.
    /// Env: `SEED_DEMO` (true/false)
    /// Default: `false`
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 8080).into(),
            instance_name: "Parley".to_string(),
            max_body_bytes: 1024 * 1024,
            tz_offset_minutes: None,
            seed_demo: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Ok(name) = std::env::var("INSTANCE_NAME") {
            config.instance_name = name;
        }

        if let Ok(val) = std::env::var("MAX_BODY_BYTES") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_body_bytes = n,
                _ => tracing::warn!(value = %val, "Invalid MAX_BODY_BYTES, using default"),
            }
        }

        if let Ok(val) = std::env::var("TZ_OFFSET_MINUTES") {
            match val.trim().parse::<i32>() {
                Ok(minutes) if offset_from_minutes(minutes).is_some() => {
                    config.tz_offset_minutes = Some(minutes);
                }
                _ => tracing::warn!(value = %val, "Invalid TZ_OFFSET_MINUTES, using local zone"),
            }
        }

        if let Ok(val) = std::env::var("SEED_DEMO") {
            config.seed_demo = val == "true" || val == "1";
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// The configured rendering zone; `None` means the host's local zone.
    pub fn timezone(&self) -> Option<FixedOffset> {
        self.tz_offset_minutes.and_then(offset_from_minutes)
    }
}

/// A UTC offset of `minutes` east, if within +/- 18 hours.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}
