//! Guilds, roles, and emojis.

use serde::{Deserialize, Serialize};

use crate::entity::channel::Channel;
use crate::entity::user::User;
use crate::types::Snowflake;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emojis: Option<Vec<Emoji>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<Channel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<String>,
}

/// Subset of a guild carried inside other entities (e.g. a channel-follower
/// webhook's source guild).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PartialGuild {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub position: i32,
    pub permissions: String,
    pub managed: bool,
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Emoji {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Snowflake>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guild_hydrates_nested_channels_and_roles() {
        let guild: Guild = serde_json::from_value(json!({
            "id": "197038439483310086",
            "name": "Testing Server",
            "roles": [{
                "id": "1",
                "name": "@everyone",
                "color": 0,
                "hoist": false,
                "position": 0,
                "permissions": "104324673",
                "managed": false,
                "mentionable": false,
            }],
            "channels": [{"id": "2", "type": 0, "name": "general"}],
        }))
        .unwrap();
        assert_eq!(guild.roles.as_ref().unwrap()[0].name, "@everyone");
        assert_eq!(
            guild.channels.as_ref().unwrap()[0].name.as_deref(),
            Some("general")
        );
    }

    #[test]
    fn guild_round_trips() {
        let raw = json!({
            "id": "1",
            "name": "g",
            "icon": null,
            "emojis": [],
        });
        let guild: Guild = serde_json::from_value(raw).unwrap();
        let back: Guild = serde_json::from_value(serde_json::to_value(&guild).unwrap()).unwrap();
        assert_eq!(guild, back);
    }

    #[test]
    fn explicitly_empty_containers_survive_encoding() {
        let guild: Guild = serde_json::from_value(json!({
            "id": "1",
            "name": "g",
            "emojis": [],
        }))
        .unwrap();
        let encoded = serde_json::to_value(&guild).unwrap();
        let obj = encoded.as_object().unwrap();
        // Set-but-empty stays; never-set is dropped.
        assert_eq!(obj.get("emojis"), Some(&json!([])));
        assert!(!obj.contains_key("roles"));
    }
}
