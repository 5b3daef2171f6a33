//! Application command definitions (what gets registered with the platform).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ApplicationCommandOptionType, ApplicationCommandType, ChannelType, Snowflake};

fn default_command_type() -> ApplicationCommandType {
    ApplicationCommandType::ChatInput
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApplicationCommand {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default = "default_command_type")]
    pub kind: ApplicationCommandType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ApplicationCommandOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_permission: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Snowflake>,
}

impl ApplicationCommand {
    /// A chat-input (slash) command with no options.
    pub fn chat_input(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ApplicationCommandType::ChatInput,
            id: None,
            application_id: None,
            guild_id: None,
            name_localizations: None,
            description_localizations: None,
            options: None,
            default_permission: None,
            version: None,
        }
    }

    pub fn option(mut self, option: ApplicationCommandOption) -> Self {
        self.options.get_or_insert_with(Vec::new).push(option);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApplicationCommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ApplicationCommandOptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ApplicationCommandOptionChoice>>,
    /// Sub-options, for `SubCommand` / `SubCommandGroup` options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ApplicationCommandOption>>,
    /// Restricts a `Channel`-typed option to the given channel kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<ChannelType>>,
}

impl ApplicationCommandOption {
    pub fn new(
        kind: ApplicationCommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            name_localizations: None,
            description_localizations: None,
            required: None,
            autocomplete: None,
            choices: None,
            options: None,
            channel_types: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApplicationCommandOptionChoice {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<HashMap<String, String>>,
    pub value: serde_json::Value,
}
