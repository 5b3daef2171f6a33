//! Inbound interactions and the typed responses handlers return.
//!
//! [`InteractionResponseData`] is the second polymorphic family next to
//! [`crate::entity::Component`]: a response carries either a channel message
//! or a modal, and which one is decided by the response's callback `type`
//! before the data fields are bound.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::channel::AllowedMentions;
use crate::entity::component::Component;
use crate::entity::embed::Embed;
use crate::entity::message::Message;
use crate::entity::user::{PartialGuildMember, User};
use crate::types::{
    ApplicationCommandOptionType, ApplicationCommandType, ComponentType, InteractionCallbackType,
    InteractionType, MessageFlags, Snowflake,
};

/// One inbound event delivered through the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Interaction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub token: String,
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<PartialGuildMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
}

impl Interaction {
    /// Name of the invoked command, when this interaction carries one.
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.name.as_deref())
    }

    /// The user that triggered the interaction, from either the guild member
    /// payload or the bare user payload.
    pub fn invoking_user(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }

    /// Looks up a top-level option value by name.
    pub fn option_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.data
            .as_ref()
            .and_then(|d| d.options.as_ref())?
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InteractionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ApplicationCommandType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandInteractionOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
    // Component / modal-submit payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<ComponentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

/// One supplied option of a command invocation. Sub-command groups nest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommandInteractionOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ApplicationCommandOptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandInteractionOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// What a handler returns: a callback type plus its type-dependent payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

impl InteractionResponse {
    /// The fixed acknowledgement for a liveness ping.
    pub fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::Pong,
            data: None,
        }
    }

    /// An immediate channel message response.
    pub fn message(message: InteractionResponseMessage) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionResponseData::Message(message)),
        }
    }

    /// Shorthand for a plain-text channel message response.
    pub fn content(text: impl Into<String>) -> Self {
        Self::message(InteractionResponseMessage::new().content(text))
    }

    /// A modal response.
    pub fn modal(modal: InteractionResponseModal) -> Self {
        Self {
            kind: InteractionCallbackType::Modal,
            data: Some(InteractionResponseData::Modal(modal)),
        }
    }
}

impl<'de> Deserialize<'de> for InteractionResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        let kind: InteractionCallbackType = serde_json::from_value(
            value
                .get("type")
                .cloned()
                .ok_or_else(|| D::Error::missing_field("type"))?,
        )
        .map_err(D::Error::custom)?;
        // The callback type decides which concrete data shape to hydrate.
        let data = match value.get_mut("data").map(serde_json::Value::take) {
            None | Some(serde_json::Value::Null) => None,
            Some(raw) if kind == InteractionCallbackType::Modal => Some(
                serde_json::from_value(raw)
                    .map(InteractionResponseData::Modal)
                    .map_err(D::Error::custom)?,
            ),
            Some(raw) => Some(
                serde_json::from_value(raw)
                    .map(InteractionResponseData::Message)
                    .map_err(D::Error::custom)?,
            ),
        };
        Ok(Self { kind, data })
    }
}

/// The payload half of a response, shaped by the callback type.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResponseData {
    Message(InteractionResponseMessage),
    Modal(InteractionResponseModal),
}

impl Serialize for InteractionResponseData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Message(d) => d.serialize(serializer),
            Self::Modal(d) => d.serialize(serializer),
        }
    }
}

impl From<InteractionResponseMessage> for InteractionResponseData {
    fn from(message: InteractionResponseMessage) -> Self {
        Self::Message(message)
    }
}

impl From<InteractionResponseModal> for InteractionResponseData {
    fn from(modal: InteractionResponseModal) -> Self {
        Self::Modal(modal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InteractionResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

impl InteractionResponseMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    /// Marks the response as only visible to the invoking user.
    pub fn ephemeral(mut self) -> Self {
        let flags = self.flags.unwrap_or(MessageFlags::empty());
        self.flags = Some(flags | MessageFlags::EPHEMERAL);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InteractionResponseModal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<Component>,
}
