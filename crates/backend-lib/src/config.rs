// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Fallback signing secret for local development only
pub const DEV_TOKEN_SECRET: &str = "stockroom-dev-secret";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// HMAC secret for signing bearer tokens; set via `STOCKROOM_TOKEN_SECRET`
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_string(),
            token_secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_secs: 60 * 60, // 1 hour
            bcrypt_cost: 10,
        }
    }
}

impl Settings {
    /// Load settings from `stockroom.toml` and `STOCKROOM_*` environment
    /// variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("stockroom.toml"))
            .merge(Env::prefixed("STOCKROOM_"))
            .extract()?;

        Ok(settings)
    }
}
