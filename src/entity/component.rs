//! Message components: action rows, buttons, select menus, text inputs.
//!
//! [`Component`] is a polymorphic family dispatched on the `type`
//! discriminant. Deserialization reads the discriminant *first*, selects the
//! concrete variant, and only then hydrates that variant's fields — so the
//! abstract family never materializes on its own. Each variant re-asserts
//! its own discriminant after hydration: deserializing a [`Button`] whose
//! payload says `"type": 3` is a hard validation error, not a silent fixup.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::guild::Emoji;
use crate::types::{ButtonStyle, ComponentType, TextInputStyle};

/// One message component, concrete variant selected by the wire `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
}

impl Component {
    /// The discriminant of the concrete variant.
    pub fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(_) => ComponentType::SelectMenu,
            Self::TextInput(_) => ComponentType::TextInput,
        }
    }

    /// Wrap components in an action row.
    pub fn action_row(components: Vec<Component>) -> Self {
        Self::ActionRow(ActionRow {
            kind: ComponentType::ActionRow,
            components,
        })
    }

    /// A clickable button with a developer-defined `custom_id`.
    pub fn button(style: ButtonStyle, label: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self::Button(Button {
            kind: ComponentType::Button,
            style,
            label: Some(label.into()),
            emoji: None,
            custom_id: Some(custom_id.into()),
            url: None,
            disabled: None,
        })
    }

    /// A text input for use inside a modal.
    pub fn text_input(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: TextInputStyle,
        required: bool,
    ) -> Self {
        Self::TextInput(TextInput {
            kind: ComponentType::TextInput,
            custom_id: custom_id.into(),
            style,
            label: label.into(),
            min_length: None,
            max_length: None,
            required: Some(required),
            value: None,
            placeholder: None,
        })
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ActionRow(c) => c.serialize(serializer),
            Self::Button(c) => c.serialize(serializer),
            Self::SelectMenu(c) => c.serialize(serializer),
            Self::TextInput(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| D::Error::missing_field("type"))?;
        match kind {
            1 => serde_json::from_value(value).map(Self::ActionRow),
            2 => serde_json::from_value(value).map(Self::Button),
            3 => serde_json::from_value(value).map(Self::SelectMenu),
            4 => serde_json::from_value(value).map(Self::TextInput),
            other => {
                return Err(D::Error::custom(format!(
                    "unknown component type {other}"
                )))
            }
        }
        .map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Per-variant discriminant checks
// ---------------------------------------------------------------------------

fn expect_kind<'de, D: Deserializer<'de>>(
    deserializer: D,
    expected: ComponentType,
) -> Result<ComponentType, D::Error> {
    let kind = ComponentType::deserialize(deserializer)?;
    if kind != expected {
        return Err(D::Error::custom(format!(
            "component type mismatch: expected {expected:?}, got {kind:?}"
        )));
    }
    Ok(kind)
}

fn kind_action_row<'de, D: Deserializer<'de>>(d: D) -> Result<ComponentType, D::Error> {
    expect_kind(d, ComponentType::ActionRow)
}

fn kind_button<'de, D: Deserializer<'de>>(d: D) -> Result<ComponentType, D::Error> {
    expect_kind(d, ComponentType::Button)
}

fn kind_select_menu<'de, D: Deserializer<'de>>(d: D) -> Result<ComponentType, D::Error> {
    expect_kind(d, ComponentType::SelectMenu)
}

fn kind_text_input<'de, D: Deserializer<'de>>(d: D) -> Result<ComponentType, D::Error> {
    expect_kind(d, ComponentType::TextInput)
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type", deserialize_with = "kind_action_row")]
    pub kind: ComponentType,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Button {
    #[serde(rename = "type", deserialize_with = "kind_button")]
    pub kind: ComponentType,
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectMenu {
    #[serde(rename = "type", deserialize_with = "kind_select_menu")]
    pub kind: ComponentType,
    pub custom_id: String,
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextInput {
    #[serde(rename = "type", deserialize_with = "kind_text_input")]
    pub kind: ComponentType,
    pub custom_id: String,
    pub style: TextInputStyle,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discriminant_selects_the_concrete_variant() {
        let component: Component = serde_json::from_value(json!({
            "type": 2,
            "style": 1,
            "label": "Click me",
            "custom_id": "btn_1",
        }))
        .unwrap();
        assert!(matches!(component, Component::Button(_)));
        assert_eq!(component.kind(), ComponentType::Button);
    }

    #[test]
    fn unknown_discriminant_is_a_hard_error() {
        let err = serde_json::from_value::<Component>(json!({"type": 8, "custom_id": "x"}));
        assert!(err.is_err());
    }

    #[test]
    fn missing_discriminant_is_a_hard_error() {
        assert!(serde_json::from_value::<Component>(json!({"custom_id": "x"})).is_err());
    }

    #[test]
    fn conflicting_discriminant_on_concrete_variant_fails() {
        // A button payload claiming to be a select menu.
        let err = serde_json::from_value::<Button>(json!({
            "type": 3,
            "style": 1,
            "custom_id": "btn_1",
        }));
        assert!(err.is_err());
    }

    #[test]
    fn action_row_hydrates_children_recursively() {
        let row: Component = serde_json::from_value(json!({
            "type": 1,
            "components": [
                {"type": 2, "style": 4, "label": "No", "custom_id": "no"},
                {"type": 3, "custom_id": "pick", "options": [
                    {"label": "One", "value": "1"},
                ]},
            ],
        }))
        .unwrap();
        let Component::ActionRow(row) = row else {
            panic!("expected action row");
        };
        assert_eq!(row.components.len(), 2);
        assert!(matches!(row.components[0], Component::Button(_)));
        assert!(matches!(row.components[1], Component::SelectMenu(_)));
    }

    #[test]
    fn components_round_trip() {
        let row = Component::action_row(vec![
            Component::button(ButtonStyle::Primary, "Go", "go"),
            Component::text_input("report", "What happened?", TextInputStyle::Paragraph, true),
        ]);
        let encoded = serde_json::to_value(&row).unwrap();
        assert_eq!(encoded["type"], json!(1));
        assert_eq!(encoded["components"][0]["type"], json!(2));
        let back: Component = serde_json::from_value(encoded).unwrap();
        assert_eq!(row, back);
    }

    #[test]
    fn unset_button_fields_are_omitted() {
        let button = Component::button(ButtonStyle::Secondary, "Hi", "hi");
        let encoded = serde_json::to_value(&button).unwrap();
        let obj = encoded.as_object().unwrap();
        assert!(!obj.contains_key("url"));
        assert!(!obj.contains_key("disabled"));
        assert!(!obj.contains_key("emoji"));
    }
}
