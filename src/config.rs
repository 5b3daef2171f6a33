//! Process configuration, read from the environment.

use std::net::SocketAddr;

use crate::error::{Error, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ENDPOINT: &str = "/interactions";

/// Everything the application needs at startup. Credentials come from the
/// environment; a `.env` file is honored when present (loaded in `main`).
#[derive(Debug, Clone)]
pub struct Config {
    /// The platform-assigned application id.
    pub application_id: String,
    /// Hex-encoded Ed25519 public key used to verify inbound interactions.
    pub public_key: String,
    /// Bot token for authorized REST calls. Absent means the REST surface is
    /// unusable but the webhook endpoint still works.
    pub bot_token: Option<String>,
    /// Address the webhook endpoint binds to.
    pub bind_addr: SocketAddr,
    /// Path the platform delivers interactions to.
    pub endpoint: String,
}

impl Config {
    /// Read configuration from `DISCORD_APP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let application_id = require_env("DISCORD_APP_ID")?;
        let public_key = require_env("DISCORD_APP_PUBLIC_KEY")?;
        let bot_token = std::env::var("DISCORD_APP_BOT_TOKEN").ok();
        let bind_addr = std::env::var("DISCORD_APP_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Validation(format!("bad DISCORD_APP_BIND_ADDR: {e}")))?;
        let endpoint =
            std::env::var("DISCORD_APP_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        if !endpoint.starts_with('/') {
            return Err(Error::Validation(
                "DISCORD_APP_ENDPOINT must start with '/'".into(),
            ));
        }
        Ok(Self {
            application_id,
            public_key,
            bot_token,
            bind_addr,
            endpoint,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Validation(format!("{name} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_bind_addr_is_a_validation_error() {
        let err: Error = "not an addr"
            .parse::<SocketAddr>()
            .map_err(|e| Error::Validation(format!("bad DISCORD_APP_BIND_ADDR: {e}")))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn default_bind_addr_parses() {
        assert!(DEFAULT_BIND_ADDR.parse::<SocketAddr>().is_ok());
    }
}
