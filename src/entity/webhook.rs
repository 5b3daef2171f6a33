//! Webhooks and the display-name policy Discord enforces on them.

use serde::{Deserialize, Serialize};

use crate::entity::guild::PartialGuild;
use crate::entity::user::User;
use crate::error::{Error, Result};
use crate::types::{Snowflake, WebhookType};

/// Pre-flight check for webhook display names.
///
/// Discord rejects names containing the reserved word "clyde" in any casing
/// and names longer than 80 characters (after trimming). Failing here saves
/// a network round trip on a request the server would reject anyway.
pub fn validate_webhook_name(name: &str) -> Result<()> {
    if name.to_lowercase().contains("clyde") {
        return Err(Error::Validation(
            "'clyde' cannot appear in a webhook name (case-insensitive)".into(),
        ));
    }
    if name.trim().chars().count() > 80 {
        return Err(Error::Validation(
            "webhook name cannot be longer than 80 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Webhook {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: WebhookType,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_guild: Option<PartialGuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /channels/{id}/webhooks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateWebhook {
    pub name: String,
    /// Image data in Data URI scheme, e.g. `data:image/png;base64,...`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Body for `PATCH /webhooks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditWebhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- name policy -------------------------------------------------------

    #[test]
    fn clyde_is_rejected_in_any_casing() {
        for name in ["clyde", "Clyde", "testClYdEhahaha", "CLYDE bot"] {
            let err = validate_webhook_name(name).unwrap_err();
            assert!(err.is_validation(), "{name} should fail validation");
        }
    }

    #[test]
    fn name_length_boundary_is_eighty() {
        assert!(validate_webhook_name(&"a".repeat(79)).is_ok());
        assert!(validate_webhook_name(&"a".repeat(80)).is_ok());
        assert!(validate_webhook_name(&"a".repeat(81)).is_err());
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_the_limit() {
        let padded = format!("  {}  ", "a".repeat(80));
        assert!(validate_webhook_name(&padded).is_ok());
    }

    // -- entity ------------------------------------------------------------

    #[test]
    fn webhook_round_trips() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "223704706495545344",
            "type": 1,
            "channel_id": "199737254929760256",
            "name": "test webhook",
            "avatar": null,
            "application_id": null,
            "token": "3d89bb7572e0fb30d8128367b3b1b44fecd1726de135cbe28a41f8b2f777c372ba2939e72279b94526ff5d1bd4358d65cf11",
            "user": {"id": "828387742575", "username": "defaultemoji"},
        }))
        .unwrap();
        assert_eq!(webhook.kind, WebhookType::Incoming);
        let back: Webhook =
            serde_json::from_value(serde_json::to_value(&webhook).unwrap()).unwrap();
        assert_eq!(webhook, back);
    }

    #[test]
    fn edit_body_omits_unset_fields() {
        let body = EditWebhook {
            name: Some("renamed".into()),
            ..EditWebhook::default()
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded, json!({"name": "renamed"}));
    }
}
