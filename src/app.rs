//! The application: command registry plus the inbound request pipeline.
//!
//! Every webhook request runs the same state machine: verify the Ed25519
//! signature over `timestamp || body`, parse the body into a typed
//! [`Interaction`], answer liveness pings with the fixed acknowledgement,
//! and dispatch command invocations to the registered handler by exact name.
//! Verification always completes before any handler code runs.

use std::collections::HashMap;

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::client::Client;
use crate::entity::{ApplicationCommand, Interaction, InteractionResponse};
use crate::error::{Error, Result};
use crate::types::InteractionType;

/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Header carrying the timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// A command handler: typed interaction in, typed response out.
pub type Handler = Box<dyn Fn(&Interaction) -> Result<InteractionResponse> + Send + Sync>;

struct RegisteredCommand {
    definition: ApplicationCommand,
    handler: Handler,
}

/// One Discord application: credentials, REST client, and command registry.
///
/// The registry is written during startup and only read afterwards, so the
/// app can be shared behind an `Arc` across request tasks.
pub struct App {
    client: Client,
    verifying_key: VerifyingKey,
    commands: HashMap<String, RegisteredCommand>,
}

impl App {
    /// Build an app from its REST client and hex-encoded public key.
    pub fn new(client: Client, public_key: &str) -> Result<Self> {
        Ok(Self {
            client,
            verifying_key: parse_public_key(public_key)?,
            commands: HashMap::new(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Register a command handler under the command's name.
    ///
    /// Registering the same name twice replaces the earlier entry.
    pub fn register_command<F>(&mut self, definition: ApplicationCommand, handler: F) -> &mut Self
    where
        F: Fn(&Interaction) -> Result<InteractionResponse> + Send + Sync + 'static,
    {
        let name = definition.name.clone();
        if self
            .commands
            .insert(
                name.clone(),
                RegisteredCommand {
                    definition,
                    handler: Box::new(handler),
                },
            )
            .is_some()
        {
            warn!(command = %name, "replaced an existing command registration");
        } else {
            debug!(command = %name, "command registered");
        }
        self
    }

    /// Register a command handler and immediately push the definition to the
    /// platform's command endpoint. The remote sync is a registration-time
    /// side effect only; dispatch never touches the network.
    pub async fn register_command_with_push<F>(
        &mut self,
        definition: ApplicationCommand,
        handler: F,
    ) -> Result<ApplicationCommand>
    where
        F: Fn(&Interaction) -> Result<InteractionResponse> + Send + Sync + 'static,
    {
        let registered = self.client.create_command(&definition).await?;
        info!(command = %definition.name, "pushed command definition");
        self.register_command(definition, handler);
        Ok(registered)
    }

    /// Names of all registered commands.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Push the full registered command set to the platform, replacing
    /// whatever was registered remotely before. Call once at startup, after
    /// all [`App::register_command`] calls.
    pub async fn sync_commands(&self) -> Result<Vec<ApplicationCommand>> {
        let definitions: Vec<ApplicationCommand> = self
            .commands
            .values()
            .map(|c| c.definition.clone())
            .collect();
        let registered = self.client.bulk_overwrite_commands(&definitions).await?;
        info!(count = registered.len(), "synced command definitions");
        Ok(registered)
    }

    // ------------------------------------------------------------------
    // Request pipeline
    // ------------------------------------------------------------------

    /// Verify an inbound request's signature over `timestamp || body`.
    pub fn verify_signature(&self, signature: &str, timestamp: &str, body: &[u8]) -> Result<()> {
        let bytes = hex::decode(signature).map_err(|_| Error::Signature)?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| Error::Signature)?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.verifying_key
            .verify_strict(&message, &signature)
            .map_err(|_| Error::Signature)
    }

    /// Run one request through the pipeline and produce the HTTP status and
    /// JSON body to respond with. Transport-independent so it can be driven
    /// directly by tests; the server glue lives in [`crate::server`].
    pub fn process_request(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> (u16, Value) {
        // 1. Verify. Nothing else happens on failure.
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            debug!("request missing signature headers");
            return (401, json!({"error": "invalid request signature"}));
        };
        if self.verify_signature(signature, timestamp, body).is_err() {
            debug!("request failed signature verification");
            return (401, json!({"error": "invalid request signature"}));
        }

        // 2. Parse; malformed bodies fail closed.
        let interaction: Interaction = match serde_json::from_slice(body) {
            Ok(interaction) => interaction,
            Err(e) => {
                debug!(error = %e, "unparseable interaction body");
                return (400, json!({"error": "malformed interaction"}));
            }
        };

        // 3. Classify. Pings short-circuit before any handler lookup.
        match interaction.kind {
            InteractionType::Ping => {
                debug!("liveness ping");
                return match serde_json::to_value(InteractionResponse::pong()) {
                    Ok(body) => (200, body),
                    Err(e) => {
                        error!(error = %e, "failed to encode pong");
                        (500, json!({"error": "internal server error"}))
                    }
                };
            }
            InteractionType::ApplicationCommand => {}
            other => {
                debug!(kind = ?other, "unsupported interaction kind");
                return (400, json!({"error": "unsupported interaction type"}));
            }
        }

        // 4. Dispatch by exact command name.
        let Some(name) = interaction.command_name() else {
            return (400, json!({"error": "interaction carries no command name"}));
        };
        let Some(command) = self.commands.get(name) else {
            warn!(command = %name, "no handler registered");
            return (422, json!({"error": format!("unknown command: {name}")}));
        };

        // 5. Respond. A failing handler becomes a generic 500 so internals
        // never leak to the caller.
        info!(command = %name, interaction_id = %interaction.id, "dispatching");
        match (command.handler)(&interaction) {
            Ok(response) => match serde_json::to_value(&response) {
                Ok(body) => (200, body),
                Err(e) => {
                    error!(command = %name, error = %e, "failed to encode response");
                    (500, json!({"error": "internal server error"}))
                }
            },
            Err(e) => {
                error!(command = %name, error = %e, "handler failed");
                (500, json!({"error": "internal server error"}))
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("application_id", &self.client.application_id())
            .field("commands", &self.commands.keys())
            .finish()
    }
}

fn parse_public_key(hex_key: &str) -> Result<VerifyingKey> {
    let bytes = hex::decode(hex_key)
        .map_err(|e| Error::Validation(format!("public key is not valid hex: {e}")))?;
    let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
        .try_into()
        .map_err(|_| Error::Validation("public key must be 32 bytes".into()))?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| Error::Validation(format!("bad ed25519 public key: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use serde_json::json;

    fn test_app() -> (App, SigningKey) {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let public_key = hex::encode(signing_key.verifying_key().as_bytes());
        let client = Client::new("12345678901234567890").unwrap();
        let mut app = App::new(client, &public_key).unwrap();
        app.register_command(
            ApplicationCommand::chat_input("version", "App version"),
            |_interaction| Ok(InteractionResponse::content("0.1.0")),
        );
        app.register_command(
            ApplicationCommand::chat_input("broken", "Always fails"),
            |_interaction| Err(Error::Validation("boom".into())),
        );
        (app, signing_key)
    }

    fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(key.sign(&message).to_bytes())
    }

    fn command_body(name: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "846462639134605312",
            "application_id": "12345678901234567890",
            "type": 2,
            "token": "UNIQUE_TOKEN",
            "version": 1,
            "data": {"id": "771825006014889984", "name": name, "type": 1},
        }))
        .unwrap()
    }

    // -- key parsing -------------------------------------------------------

    #[test]
    fn bad_public_keys_are_validation_errors() {
        let client = Client::new("1").unwrap();
        assert!(App::new(client.clone(), "not hex").unwrap_err().is_validation());
        assert!(App::new(client, "abcd").unwrap_err().is_validation());
    }

    // -- verification ------------------------------------------------------

    #[test]
    fn missing_headers_are_unauthorized() {
        let (app, _key) = test_app();
        let (status, _body) = app.process_request(None, None, b"{}");
        assert_eq!(status, 401);
        let (status, _body) = app.process_request(Some("ab"), None, b"{}");
        assert_eq!(status, 401);
    }

    #[test]
    fn forged_signatures_are_unauthorized() {
        let (app, _key) = test_app();
        let other_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let body = command_body("version");
        let signature = sign(&other_key, "1692000000", &body);
        let (status, _body) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 401);
    }

    #[test]
    fn tampered_timestamps_break_the_signature() {
        let (app, key) = test_app();
        let body = command_body("version");
        let signature = sign(&key, "1692000000", &body);
        let (status, _body) = app.process_request(Some(&signature), Some("1692999999"), &body);
        assert_eq!(status, 401);
    }

    // -- pipeline ----------------------------------------------------------

    #[test]
    fn pings_get_the_fixed_acknowledgement() {
        let (app, key) = test_app();
        let body = serde_json::to_vec(&json!({
            "id": "1", "application_id": "2", "type": 1, "token": "t", "version": 1,
        }))
        .unwrap();
        let signature = sign(&key, "1692000000", &body);
        let (status, response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 200);
        assert_eq!(response, json!({"type": 1}));
    }

    #[test]
    fn malformed_bodies_fail_closed() {
        let (app, key) = test_app();
        let body = b"{\"not\": \"an interaction\"}".to_vec();
        let signature = sign(&key, "1692000000", &body);
        let (status, _response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 400);
    }

    #[test]
    fn commands_dispatch_to_their_handler() {
        let (app, key) = test_app();
        let body = command_body("version");
        let signature = sign(&key, "1692000000", &body);
        let (status, response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 200);
        assert_eq!(response, json!({"type": 4, "data": {"content": "0.1.0"}}));
    }

    #[test]
    fn unknown_commands_are_unprocessable() {
        let (app, key) = test_app();
        let body = command_body("Version"); // wrong case, lookup is exact
        let signature = sign(&key, "1692000000", &body);
        let (status, _response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 422);
    }

    #[test]
    fn handler_failures_become_a_generic_500() {
        let (app, key) = test_app();
        let body = command_body("broken");
        let signature = sign(&key, "1692000000", &body);
        let (status, response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(status, 500);
        // Internals must not leak.
        assert_eq!(response, json!({"error": "internal server error"}));
    }

    #[test]
    fn re_registering_a_name_replaces_the_handler() {
        let (mut app, key) = test_app();
        app.register_command(
            ApplicationCommand::chat_input("version", "App version"),
            |_interaction| Ok(InteractionResponse::content("0.2.0")),
        );
        let body = command_body("version");
        let signature = sign(&key, "1692000000", &body);
        let (_status, response) = app.process_request(Some(&signature), Some("1692000000"), &body);
        assert_eq!(response["data"]["content"], json!("0.2.0"));
    }
}
