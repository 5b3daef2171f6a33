//! Authenticated HTTP client for the platform's REST API.
//!
//! All outbound calls funnel through [`Client::call_api`] so auth headers,
//! status handling, and logging live in one place. The client is the sole
//! owner of credential state — entities hold a handle back to it but never
//! see the token.

use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::entity::{
    validate_webhook_name, ApplicationCommand, Channel, CreateMessage, CreateWebhook, EditMessage,
    EditWebhook, Guild, Message, Webhook,
};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = concat!("DiscordApp (github.com/discord-app/discord-app, ", env!("CARGO_PKG_VERSION"), ")");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A thin authenticated client for the REST surface.
///
/// Cheap to clone (the underlying connection pool is shared).
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    application_id: String,
    bot_token: Option<String>,
}

impl Client {
    /// Create a client without credentials. Every API call will fail with an
    /// authorization error until [`Client::with_token`] supplies one.
    pub fn new(application_id: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            application_id: application_id.into(),
            bot_token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    /// Point the client at a different API root (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn is_authorized(&self) -> bool {
        self.bot_token.is_some()
    }

    fn ensure_authorized(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| Error::Unauthorized("client holds no bot token".into()))
    }

    // ------------------------------------------------------------------
    // Low-level: the single request method everything funnels through
    // ------------------------------------------------------------------

    /// Send an authenticated request to `{base_url}/{path}` and return the
    /// decoded JSON body together with the raw status code.
    ///
    /// Fails before any network I/O if the client is unauthorized. Non-2xx
    /// statuses become [`Error::Api`].
    pub async fn call_api(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(Value, u16)> {
        let token = self.ensure_authorized()?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        debug!(method = %method, path, "api request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("authorization", format!("Bot {token}"));
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if !(200..300).contains(&status) {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(method = %method, path, status, "api error response");
            return Err(Error::Api {
                status,
                route: format!("{method} /{}", path.trim_start_matches('/')),
                body,
            });
        }

        // Deletes come back 204 with an empty body.
        let decoded = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((decoded, status))
    }

    /// Like [`Client::call_api`] but hydrates the response body.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let (decoded, _status) = self.call_api(method, path, body).await?;
        Ok(serde_json::from_value(decoded)?)
    }

    // ------------------------------------------------------------------
    // Channels & guilds
    // ------------------------------------------------------------------

    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        self.request_json(Method::GET, &format!("channels/{channel_id}"), None)
            .await
    }

    pub async fn get_guild(&self, guild_id: &str) -> Result<Guild> {
        self.request_json(Method::GET, &format!("guilds/{guild_id}"), None)
            .await
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub async fn create_message(
        &self,
        channel_id: &str,
        message: &CreateMessage,
    ) -> Result<Message> {
        let body = serde_json::to_value(message)?;
        self.request_json(
            Method::POST,
            &format!("channels/{channel_id}/messages"),
            Some(&body),
        )
        .await
    }

    pub async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        edit: &EditMessage,
    ) -> Result<Message> {
        let body = serde_json::to_value(edit)?;
        self.request_json(
            Method::PATCH,
            &format!("channels/{channel_id}/messages/{message_id}"),
            Some(&body),
        )
        .await
    }

    pub async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        self.call_api(
            Method::DELETE,
            &format!("channels/{channel_id}/messages/{message_id}"),
            None,
        )
        .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Webhooks
    // ------------------------------------------------------------------

    /// Create a webhook on a channel. The display name is validated before
    /// any network I/O.
    pub async fn create_webhook(
        &self,
        channel_id: &str,
        webhook: &CreateWebhook,
    ) -> Result<Webhook> {
        validate_webhook_name(&webhook.name)?;
        let body = serde_json::to_value(webhook)?;
        self.request_json(
            Method::POST,
            &format!("channels/{channel_id}/webhooks"),
            Some(&body),
        )
        .await
    }

    pub async fn channel_webhooks(&self, channel_id: &str) -> Result<Vec<Webhook>> {
        self.request_json(Method::GET, &format!("channels/{channel_id}/webhooks"), None)
            .await
    }

    pub async fn get_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        self.request_json(Method::GET, &format!("webhooks/{webhook_id}"), None)
            .await
    }

    pub async fn edit_webhook(&self, webhook_id: &str, edit: &EditWebhook) -> Result<Webhook> {
        if let Some(name) = edit.name.as_deref() {
            validate_webhook_name(name)?;
        }
        let body = serde_json::to_value(edit)?;
        self.request_json(Method::PATCH, &format!("webhooks/{webhook_id}"), Some(&body))
            .await
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        self.call_api(Method::DELETE, &format!("webhooks/{webhook_id}"), None)
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Command registration
    // ------------------------------------------------------------------

    /// Push (or update) one global command definition.
    pub async fn create_command(&self, command: &ApplicationCommand) -> Result<ApplicationCommand> {
        let body = serde_json::to_value(command)?;
        self.request_json(
            Method::POST,
            &format!("applications/{}/commands", self.application_id),
            Some(&body),
        )
        .await
    }

    /// Replace the full global command set.
    pub async fn bulk_overwrite_commands(
        &self,
        commands: &[ApplicationCommand],
    ) -> Result<Vec<ApplicationCommand>> {
        let body = serde_json::to_value(commands)?;
        self.request_json(
            Method::PUT,
            &format!("applications/{}/commands", self.application_id),
            Some(&body),
        )
        .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("application_id", &self.application_id)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unauthorized_client() -> Client {
        Client::new("12345678901234567890").unwrap()
    }

    #[test]
    fn token_controls_the_authorized_state() {
        let client = unauthorized_client();
        assert!(!client.is_authorized());
        assert!(client.clone().with_token("abc").is_authorized());
    }

    #[tokio::test]
    async fn unauthorized_calls_fail_before_any_network_io() {
        // Base URL points nowhere reachable; the call must fail on the
        // credential check, not on the transport.
        let client = unauthorized_client().with_base_url("http://127.0.0.1:1");
        let err = client
            .call_api(Method::GET, "channels/1", None)
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }

    #[tokio::test]
    async fn webhook_name_policy_is_checked_before_dispatch() {
        let client = unauthorized_client()
            .with_token("t")
            .with_base_url("http://127.0.0.1:1");
        let err = client
            .create_webhook(
                "1",
                &CreateWebhook {
                    name: "Clyde impersonator".into(),
                    avatar: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = client
            .edit_webhook(
                "1",
                &EditWebhook {
                    name: Some("a".repeat(81)),
                    ..EditWebhook::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn debug_output_never_leaks_the_token() {
        let client = unauthorized_client().with_token("secret-token");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
