//! Messages and the request bodies that create or edit them.

use serde::{Deserialize, Serialize};

use crate::entity::channel::{AllowedMentions, Channel, ChannelMention};
use crate::entity::component::Component;
use crate::entity::embed::Embed;
use crate::entity::guild::{Emoji, Role};
use crate::entity::user::{PartialGuildMember, User};
use crate::types::{
    InteractionType, MessageActivityType, MessageFlags, MessageType, Snowflake,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub timestamp: String,
    pub tts: bool,
    pub mention_everyone: bool,
    pub mentions: Vec<User>,
    pub mention_roles: Vec<Role>,
    pub attachments: Vec<Attachment>,
    pub embeds: Vec<Embed>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<PartialGuildMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention_channels: Option<Vec<ChannelMention>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<MessageActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<MessageInteraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Box<Channel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_items: Option<Vec<StickerItem>>,
}

impl Message {
    /// Unix-millis timestamp derived from the message snowflake.
    pub fn snowflake_timestamp_ms(&self) -> Option<u64> {
        self.id
            .parse::<u64>()
            .ok()
            .map(|sf| (sf >> 22) + 1420070400000)
    }

    /// Whether a given user id is mentioned in the message.
    pub fn mentions_user(&self, user_id: &str) -> bool {
        self.mentions.iter().any(|u| u.id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Attachment {
    pub id: Snowflake,
    pub filename: String,
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

/// Attachment stub referenced when composing a message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PartialAttachment {
    pub id: Snowflake,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reaction {
    pub count: u64,
    pub me: bool,
    pub emoji: Emoji,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageActivity {
    #[serde(rename = "type")]
    pub kind: MessageActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MessageReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_if_not_exists: Option<bool>,
}

/// Interaction metadata attached to a message that is an interaction response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageInteraction {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub name: String,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<PartialGuildMember>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StickerItem {
    pub id: Snowflake,
    pub name: String,
    pub format_type: u8,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /channels/{id}/messages`. Only fields the caller set are
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker_ids: Option<Vec<Snowflake>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<PartialAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl CreateMessage {
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

    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.message_reference = Some(MessageReference {
            message_id: Some(message_id.into()),
            ..MessageReference::default()
        });
        self
    }

    pub fn component_row(mut self, row: Component) -> Self {
        self.components.get_or_insert_with(Vec::new).push(row);
        self
    }
}

/// Body for `PATCH /channels/{id}/messages/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

impl EditMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_message_json() -> serde_json::Value {
        json!({
            "id": "334385199974967042",
            "channel_id": "290926798999357250",
            "timestamp": "2017-07-11T17:27:07.299000+00:00",
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "content": "Supa Hot",
            "type": 0,
            "author": {
                "id": "53908099506183680",
                "username": "Mason",
                "discriminator": "9999",
            },
            "pinned": false,
        })
    }

    #[test]
    fn message_round_trips() {
        let message: Message = serde_json::from_value(sample_message_json()).unwrap();
        let back: Message =
            serde_json::from_value(serde_json::to_value(&message).unwrap()).unwrap();
        assert_eq!(message, back);
    }

    #[test]
    fn required_empty_lists_are_always_encoded() {
        let message: Message = serde_json::from_value(sample_message_json()).unwrap();
        let encoded = serde_json::to_value(&message).unwrap();
        assert_eq!(encoded["mentions"], json!([]));
        assert_eq!(encoded["embeds"], json!([]));
        // Unset optional lists stay absent.
        assert!(encoded.get("components").is_none());
        assert!(encoded.get("sticker_items").is_none());
    }

    #[test]
    fn referenced_message_hydrates_recursively() {
        let mut raw = sample_message_json();
        raw["type"] = json!(19);
        raw["referenced_message"] = sample_message_json();
        raw["components"] = json!([
            {"type": 1, "components": [
                {"type": 2, "style": 5, "label": "Docs", "url": "https://example.com"},
            ]},
        ]);
        let message: Message = serde_json::from_value(raw).unwrap();
        assert_eq!(message.kind, MessageType::Reply);
        assert_eq!(message.referenced_message.unwrap().content, "Supa Hot");
        assert_eq!(message.components.unwrap().len(), 1);
    }

    #[test]
    fn snowflake_timestamp_is_derived_from_the_id() {
        let message: Message = serde_json::from_value(sample_message_json()).unwrap();
        // (334385199974967042 >> 22) + discord epoch
        assert_eq!(message.snowflake_timestamp_ms(), Some(1499794027265));
    }

    #[test]
    fn create_message_serializes_only_set_fields() {
        let body = CreateMessage::new().content("hi").reply_to("42");
        let encoded = serde_json::to_value(&body).unwrap();
        let obj = encoded.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(encoded["message_reference"]["message_id"], json!("42"));
    }

    #[test]
    fn edit_message_defaults_to_an_empty_body() {
        let encoded = serde_json::to_value(EditMessage::new()).unwrap();
        assert_eq!(encoded, json!({}));
    }
}
