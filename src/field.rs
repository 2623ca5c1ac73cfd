//! Field model and per-pass field sets
//!
//! A [`Field`] is the engine's view of one controlled input: a stable
//! identity, a current value, a declared rule list and optional scoped
//! overrides. Fields are supplied fresh by the host on every triggering
//! event; nothing here touches a real widget tree.
//!
//! A [`FormSnapshot`] is the ordered field set for one evaluation pass. It is
//! threaded explicitly through the evaluator and the submission gate so that
//! no pass-scoped state lives in a shared slot.

use crate::config::{FieldOverrides, FormConfig};
use std::collections::HashMap;

/// Structural kind of a field
///
/// `Text` covers text inputs, textareas and single-choice selects; the other
/// kinds change how `required` and the grouped rules read the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    SelectMultiple,
}

/// Current value of a field
///
/// `Selection(None)` is the empty-selection sentinel of a multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Selection(Option<Vec<String>>),
}

impl FieldValue {
    /// Trim surrounding whitespace of text values; selections pass through
    pub fn trimmed(&self) -> FieldValue {
        match self {
            FieldValue::Text(text) => FieldValue::Text(text.trim().to_string()),
            FieldValue::Selection(selection) => FieldValue::Selection(selection.clone()),
        }
    }

    /// True for an empty text value (selections are never "empty text")
    pub fn is_empty_text(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::Selection(_) => None,
        }
    }

    /// Number of selected options; the empty-selection sentinel counts as 0
    pub fn selection_len(&self) -> usize {
        match self {
            FieldValue::Selection(Some(options)) => options.len(),
            FieldValue::Selection(None) => 0,
            FieldValue::Text(_) => 0,
        }
    }
}

/// One controlled input
#[derive(Debug, Clone)]
pub struct Field {
    /// Stable identity, unique within the form
    pub key: String,

    /// Name attribute; checkbox/radio groups share one name
    pub name: String,

    /// Structural kind
    pub kind: FieldKind,

    /// Current value
    pub value: FieldValue,

    /// Checked state (checkbox/radio only)
    pub checked: bool,

    /// Disabled fields are skipped entirely
    pub disabled: bool,

    /// Declared rule list, e.g. `"required,minLength[4]"`
    pub rules: String,

    /// Per-field option overrides, merged over the form options
    pub overrides: Option<FieldOverrides>,

    /// Per-method error-message overrides
    pub messages: HashMap<String, String>,
}

impl Field {
    /// Text-like field (input, textarea, single select)
    pub fn text(key: &str, rules: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            kind: FieldKind::Text,
            value: FieldValue::Text(value.to_string()),
            checked: false,
            disabled: false,
            rules: rules.to_string(),
            overrides: None,
            messages: HashMap::new(),
        }
    }

    /// Checkbox; `name` is shared across the group
    pub fn checkbox(key: &str, name: &str, rules: &str, checked: bool) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind: FieldKind::Checkbox,
            // checkboxes carry the HTML default value so value-keyed logic
            // never sees an empty string
            value: FieldValue::Text("on".to_string()),
            checked,
            disabled: false,
            rules: rules.to_string(),
            overrides: None,
            messages: HashMap::new(),
        }
    }

    /// Radio button; `name` is shared across the group
    pub fn radio(key: &str, name: &str, rules: &str, value: &str, checked: bool) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind: FieldKind::Radio,
            value: FieldValue::Text(value.to_string()),
            checked,
            disabled: false,
            rules: rules.to_string(),
            overrides: None,
            messages: HashMap::new(),
        }
    }

    /// Multi-select; `None` means nothing is selected
    pub fn multi_select(key: &str, rules: &str, selection: Option<Vec<String>>) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            kind: FieldKind::SelectMultiple,
            value: FieldValue::Selection(selection),
            checked: false,
            disabled: false,
            rules: rules.to_string(),
            overrides: None,
            messages: HashMap::new(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_overrides(mut self, overrides: FieldOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Override the error message recorded for one method on this field
    pub fn with_message(mut self, method: &str, message: &str) -> Self {
        self.messages.insert(method.to_string(), message.to_string());
        self
    }

    /// Identity used for remote caching and in-flight bookkeeping
    pub fn remote_identity(&self) -> &str {
        if self.name.is_empty() { &self.key } else { &self.name }
    }
}

/// The ordered field set of one evaluation pass
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    fields: Vec<Field>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Build an empty-valued snapshot from a declarative form definition
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.fields.iter().map(|field| field.to_field()).collect())
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// All fields sharing a name, in declaration order
    ///
    /// The returned borrows live as long as the snapshot, not the name.
    pub fn group<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Field> + 's {
        let name = name.to_string();
        self.fields.iter().filter(move |field| field.name == name)
    }

    /// First non-disabled member of a name group
    ///
    /// Grouped rules compute their count once, on this member only.
    pub fn first_enabled_of_group(&self, name: &str) -> Option<&Field> {
        self.group(name).find(|field| !field.disabled)
    }

    /// Number of checked, non-disabled members of a name group
    pub fn checked_len(&self, name: &str) -> usize {
        self.group(name)
            .filter(|field| !field.disabled && field.checked)
            .count()
    }

    /// Raw (untrimmed) text value of the first field carrying `name`
    pub fn raw_text(&self, name: &str) -> Option<&str> {
        self.group(name).next().and_then(|field| field.value.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_text_only() {
        let text = FieldValue::Text("  hello  ".to_string());
        assert_eq!(text.trimmed(), FieldValue::Text("hello".to_string()));

        let selection = FieldValue::Selection(Some(vec![" a ".to_string()]));
        assert_eq!(selection.trimmed(), selection);
    }

    #[test]
    fn test_selection_len_sentinel() {
        assert_eq!(FieldValue::Selection(None).selection_len(), 0);
        assert_eq!(
            FieldValue::Selection(Some(vec!["a".into(), "b".into()])).selection_len(),
            2
        );
    }

    #[test]
    fn test_group_queries() {
        let form = FormSnapshot::new(vec![
            Field::checkbox("opt-1", "opts", "maxChecked[1]", true).disabled(true),
            Field::checkbox("opt-2", "opts", "maxChecked[1]", true),
            Field::checkbox("opt-3", "opts", "maxChecked[1]", false),
        ]);
        assert_eq!(form.group("opts").count(), 3);
        assert_eq!(form.first_enabled_of_group("opts").unwrap().key, "opt-2");
        // disabled members never count
        assert_eq!(form.checked_len("opts"), 1);
    }

    #[test]
    fn test_raw_text_lookup() {
        let form = FormSnapshot::new(vec![Field::text("password", "required", "  secret ")]);
        assert_eq!(form.raw_text("password"), Some("  secret "));
    }

    #[test]
    fn test_group_borrow_outlives_name() {
        let form = FormSnapshot::new(vec![
            Field::text("password", "required", "pw"),
            Field::text("confirm", "equalTo[password]", "pw"),
        ]);
        // the name may be dropped while the returned borrows live on
        let (raw, first) = {
            let name = String::from("password");
            (form.raw_text(&name), form.first_enabled_of_group(&name))
        };
        assert_eq!(raw, Some("pw"));
        assert_eq!(first.unwrap().key, "password");
    }

    #[test]
    fn test_remote_identity_falls_back_to_key() {
        let mut field = Field::text("email", "remote[check]", "a@b.co");
        field.name = String::new();
        assert_eq!(field.remote_identity(), "email");
    }
}
