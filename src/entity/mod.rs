//! Typed entities mirroring the Discord API schema.
//!
//! Every struct here maps one JSON object shape field-for-field. Optional
//! fields are `Option<T>` and are dropped when serializing if unset — an
//! empty container that *was* set is kept, only true absence is omitted.
//! Nested objects hydrate recursively through serde, and polymorphic
//! families ([`Component`], [`InteractionResponseData`]) dispatch on their
//! `type` discriminant before any other field is bound.
//!
//! Entities compare structurally: two values are equal iff every declared
//! field is equal, nested entities included. Transport handles live in
//! [`crate::bound`], outside these types, so they never participate in
//! equality.

pub mod channel;
pub mod command;
pub mod component;
pub mod embed;
pub mod guild;
pub mod interaction;
pub mod message;
pub mod user;
pub mod webhook;

pub use channel::{AllowedMentions, Channel, ChannelMention, Overwrite, ThreadMember, ThreadMetadata};
pub use command::{ApplicationCommand, ApplicationCommandOption, ApplicationCommandOptionChoice};
pub use component::{ActionRow, Button, Component, SelectMenu, SelectOption, TextInput};
pub use embed::{
    Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedProvider, EmbedThumbnail,
    EmbedVideo,
};
pub use guild::{Emoji, Guild, PartialGuild, Role};
pub use interaction::{
    CommandInteractionOption, Interaction, InteractionData, InteractionResponse,
    InteractionResponseData, InteractionResponseMessage, InteractionResponseModal,
};
pub use message::{
    Attachment, CreateMessage, EditMessage, Message, MessageActivity, MessageInteraction,
    MessageReference, PartialAttachment, Reaction, StickerItem,
};
pub use user::{PartialGuildMember, User};
pub use webhook::{validate_webhook_name, CreateWebhook, EditWebhook, Webhook};
