//! Wire-value registry for the Discord API.
//!
//! Every platform-defined code (channel kinds, component kinds, callback
//! types, ...) has a symbolic enumeration here. Entity hydration routes all
//! enumerated fields through these conversions, so an unrecognized wire
//! value always fails deserialization instead of leaking a raw integer into
//! the entity graph.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Discord IDs are snowflakes transmitted as strings in JSON.
pub type Snowflake = String;

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ChannelType {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildAnnouncement = 5,
    AnnouncementThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    GuildStageVoice = 13,
    GuildDirectory = 14,
    GuildForum = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum VideoQualityMode {
    Auto = 1,
    Full = 2,
}

bitflags::bitflags! {
    /// Channel flag bitset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelFlags: u64 {
        const PINNED = 1 << 1;
        const REQUIRE_TAG = 1 << 4;
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum MessageType {
    Default = 0,
    RecipientAdd = 1,
    RecipientRemove = 2,
    Call = 3,
    ChannelNameChange = 4,
    ChannelIconChange = 5,
    ChannelPinnedMessage = 6,
    UserJoin = 7,
    GuildBoost = 8,
    GuildBoostTier1 = 9,
    GuildBoostTier2 = 10,
    GuildBoostTier3 = 11,
    ChannelFollowAdd = 12,
    GuildDiscoveryDisqualified = 14,
    GuildDiscoveryRequalified = 15,
    GuildDiscoveryGracePeriodInitialWarning = 16,
    GuildDiscoveryGracePeriodFinalWarning = 17,
    ThreadCreated = 18,
    Reply = 19,
    ChatInputCommand = 20,
    ThreadStarterMessage = 21,
    GuildInviteReminder = 22,
    ContextMenuCommand = 23,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum MessageActivityType {
    Join = 1,
    Spectate = 2,
    Listen = 3,
    JoinRequest = 5,
}

bitflags::bitflags! {
    /// Message flag bitset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u64 {
        const CROSSPOSTED = 1 << 0;
        const IS_CROSSPOST = 1 << 1;
        const SUPPRESS_EMBEDS = 1 << 2;
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        const URGENT = 1 << 4;
        const HAS_THREAD = 1 << 5;
        const EPHEMERAL = 1 << 6;
        const LOADING = 1 << 7;
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedMentionType {
    Roles,
    Users,
    Everyone,
}

// ---------------------------------------------------------------------------
// Embeds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedType {
    Rich,
    Image,
    Video,
    Gifv,
    Article,
    Link,
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    SelectMenu = 3,
    TextInput = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum TextInputStyle {
    Short = 1,
    Paragraph = 2,
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

// ---------------------------------------------------------------------------
// Application commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ApplicationCommandType {
    ChatInput = 1,
    User = 2,
    Message = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum ApplicationCommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum WebhookType {
    Incoming = 1,
    ChannelFollower = 2,
    Application = 3,
}

// ---------------------------------------------------------------------------
// Bitflag serde (flags travel as raw integers on the wire)
// ---------------------------------------------------------------------------

macro_rules! bitflags_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u64(self.bits())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bits = u64::deserialize(deserializer)?;
                Self::from_bits(bits).ok_or_else(|| {
                    D::Error::custom(format!(
                        "unknown bits 0x{:x} in {}",
                        bits,
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

bitflags_serde!(ChannelFlags);
bitflags_serde!(MessageFlags);

#[cfg(test)]
mod tests {
    use super::*;

    // -- repr enums --------------------------------------------------------

    #[test]
    fn channel_type_round_trips_as_integer() {
        let json = serde_json::to_string(&ChannelType::GuildStageVoice).unwrap();
        assert_eq!(json, "13");
        let back: ChannelType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChannelType::GuildStageVoice);
    }

    #[test]
    fn unknown_channel_type_is_rejected() {
        let err = serde_json::from_str::<ChannelType>("99");
        assert!(err.is_err());
    }

    #[test]
    fn unknown_interaction_type_is_rejected() {
        assert!(serde_json::from_str::<InteractionType>("0").is_err());
        assert!(serde_json::from_str::<InteractionType>("6").is_err());
    }

    #[test]
    fn callback_type_values_match_the_wire() {
        assert_eq!(
            serde_json::to_value(InteractionCallbackType::Pong).unwrap(),
            serde_json::json!(1)
        );
        assert_eq!(
            serde_json::to_value(InteractionCallbackType::Modal).unwrap(),
            serde_json::json!(9)
        );
    }

    // -- string enums ------------------------------------------------------

    #[test]
    fn embed_type_uses_lowercase_strings() {
        assert_eq!(
            serde_json::to_value(EmbedType::Rich).unwrap(),
            serde_json::json!("rich")
        );
        let back: EmbedType = serde_json::from_str("\"gifv\"").unwrap();
        assert_eq!(back, EmbedType::Gifv);
    }

    #[test]
    fn unknown_allowed_mention_type_is_rejected() {
        assert!(serde_json::from_str::<AllowedMentionType>("\"bots\"").is_err());
    }

    // -- bitflags ----------------------------------------------------------

    #[test]
    fn message_flags_round_trip_as_integer() {
        let flags = MessageFlags::EPHEMERAL | MessageFlags::SUPPRESS_EMBEDS;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "68");
        let back: MessageFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }

    #[test]
    fn message_flags_reject_unknown_bits() {
        assert!(serde_json::from_str::<MessageFlags>("4096").is_err());
    }
}
