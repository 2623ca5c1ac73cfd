//! Configuration structures and scoped-option resolution
//!
//! Global [`FormOptions`] configure one form controller. Any field may carry
//! [`FieldOverrides`] which are merged over the globals into an immutable
//! [`ScopedOptions`] value once per field per pass, before evaluation begins.
//! A whole form (options plus field declarations) can also be loaded from a
//! TOML file via [`FormConfig::from_file`].

use crate::field::{Field, FieldKind, FieldValue};
use crate::messages::MessageOverrides;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error-window placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Bubble,
    Inline,
}

/// Side of the field a bubble window attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubblePosition {
    Right,
    Left,
    Top,
    Bottom,
}

/// Global options for one form controller
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Suppress error-window rendering; failures still block submission
    pub show_error_messages: bool,

    /// Error display strategy (bubble or inline)
    pub display: DisplayMode,

    /// Class of the element that receives the error message
    pub error_template_class: String,

    /// Class added to every failing field
    pub error_class: String,

    /// Class added to every passing field
    pub valid_class: String,

    /// Class added while a remote check is in flight
    pub pending_class: String,

    /// Bubble placement side
    pub bubble_position: BubblePosition,

    /// Bubble gap on the x-axis, pixels
    pub bubble_gap_x: i32,

    /// Bubble gap on the y-axis, pixels
    pub bubble_gap_y: i32,

    /// Validate on real-time events, not only on submit
    pub real_time: bool,

    /// Space-separated real-time event names
    pub real_time_events: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            show_error_messages: true,
            display: DisplayMode::Bubble,
            error_template_class: "validetta-bubble".to_string(),
            error_class: "validetta-error".to_string(),
            valid_class: "validetta-valid".to_string(),
            pending_class: "validetta-pending".to_string(),
            bubble_position: BubblePosition::Right,
            bubble_gap_x: 15,
            bubble_gap_y: 0,
            real_time: false,
            real_time_events: "change blur".to_string(),
        }
    }
}

impl FormOptions {
    /// Event names the host should bind for real-time validation
    pub fn real_time_event_list(&self) -> Vec<&str> {
        self.real_time_events.split_whitespace().collect()
    }

    /// Resolve the effective options for one field
    ///
    /// Layered override: global defaults under, field overrides on top.
    /// Resolved once per field per pass; the result is immutable.
    pub fn scoped(&self, field: &Field) -> ScopedOptions {
        let overrides = field.overrides.clone().unwrap_or_default();
        ScopedOptions {
            show_error_messages: overrides
                .show_error_messages
                .unwrap_or(self.show_error_messages),
            display: overrides.display.unwrap_or(self.display),
            bubble_position: overrides.bubble_position.unwrap_or(self.bubble_position),
            bubble_gap_x: overrides.bubble_gap_x.unwrap_or(self.bubble_gap_x),
            bubble_gap_y: overrides.bubble_gap_y.unwrap_or(self.bubble_gap_y),
        }
    }
}

/// Per-field option overrides
///
/// All fields optional; anything unset falls through to [`FormOptions`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    pub show_error_messages: Option<bool>,
    pub display: Option<DisplayMode>,
    pub bubble_position: Option<BubblePosition>,
    pub bubble_gap_x: Option<i32>,
    pub bubble_gap_y: Option<i32>,
}

/// Effective options for one field after override resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedOptions {
    pub show_error_messages: bool,
    pub display: DisplayMode,
    pub bubble_position: BubblePosition,
    pub bubble_gap_x: i32,
    pub bubble_gap_y: i32,
}

/// Declarative field definition (from TOML)
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    /// Stable field identity
    pub key: String,

    /// Group name; defaults to the key
    #[serde(default)]
    pub name: Option<String>,

    /// Field kind (text, checkbox, radio, select_multiple)
    #[serde(default = "default_field_kind")]
    pub kind: FieldKindConfig,

    /// Declared rule list
    #[serde(default)]
    pub rules: String,

    #[serde(default)]
    pub disabled: bool,

    /// Per-method message overrides
    #[serde(default)]
    pub messages: HashMap<String, String>,

    /// Per-field option overrides
    #[serde(default)]
    pub overrides: Option<FieldOverrides>,
}

/// Field kind as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKindConfig {
    Text,
    Checkbox,
    Radio,
    SelectMultiple,
}

fn default_field_kind() -> FieldKindConfig {
    FieldKindConfig::Text
}

impl FieldConfig {
    /// Materialize an empty-valued [`Field`] from this definition
    pub fn to_field(&self) -> Field {
        let kind = match self.kind {
            FieldKindConfig::Text => FieldKind::Text,
            FieldKindConfig::Checkbox => FieldKind::Checkbox,
            FieldKindConfig::Radio => FieldKind::Radio,
            FieldKindConfig::SelectMultiple => FieldKind::SelectMultiple,
        };
        let value = match kind {
            FieldKind::SelectMultiple => FieldValue::Selection(None),
            FieldKind::Checkbox => FieldValue::Text("on".to_string()),
            _ => FieldValue::Text(String::new()),
        };
        Field {
            key: self.key.clone(),
            name: self.name.clone().unwrap_or_else(|| self.key.clone()),
            kind,
            value,
            checked: false,
            disabled: self.disabled,
            rules: self.rules.clone(),
            overrides: self.overrides.clone(),
            messages: self.messages.clone(),
        }
    }
}

/// Whole-form definition: options, message overrides and field declarations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub options: FormOptions,

    #[serde(default)]
    pub messages: MessageOverrides,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    /// Load a form definition from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&contents)?)
    }

    /// Parse a form definition from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
