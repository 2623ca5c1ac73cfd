//! Default error-message catalog and template substitution
//!
//! Every failing built-in validator produces its message from this catalog.
//! Templates may contain a `{count}` placeholder which is replaced by the
//! rule's numeric argument (e.g. `minLength[4]` -> "Minimum 4 characters
//! allowed!"). The whole catalog, or any subset of it, can be overridden by
//! the caller; per-field overrides are applied later by the evaluator.

use serde::Deserialize;
use std::collections::HashMap;

/// Catalog of error-message templates, keyed by validation method name
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

/// Partial catalog override, deserializable from TOML/JSON
///
/// Only the keys present are replaced; everything else keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageOverrides {
    #[serde(flatten)]
    pub templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut templates = HashMap::new();
        let defaults: [(&str, &str); 12] = [
            ("required", "This field is required. Please be sure to check."),
            ("email", "Your E-mail address appears to be invalid. Please be sure to check."),
            ("number", "You can enter only numbers in this field."),
            ("maxLength", "Maximum {count} characters allowed!"),
            ("minLength", "Minimum {count} characters allowed!"),
            ("maxChecked", "Maximum {count} options allowed. Please be sure to check."),
            ("minChecked", "Please select minimum {count} options."),
            ("maxSelected", "Maximum {count} selection allowed. Please be sure to check."),
            ("minSelected", "Minimum {count} selection allowed. Please be sure to check."),
            ("notEqual", "Fields do not match. Please be sure to check."),
            ("different", "Fields cannot be the same as each other."),
            ("creditCard", "Invalid credit card number. Please be sure to check."),
        ];
        for (key, template) in defaults {
            templates.insert(key.to_string(), template.to_string());
        }
        Self { templates }
    }
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw template for a method name
    pub fn template(&self, method: &str) -> Option<&str> {
        self.templates.get(method).map(String::as_str)
    }

    /// Get the message for a method, substituting `{count}` with the argument
    ///
    /// Falls back to the template untouched when there is no argument.
    pub fn render(&self, method: &str, count: Option<&str>) -> String {
        let template = self.templates.get(method).cloned().unwrap_or_default();
        match count {
            Some(count) => template.replace("{count}", count),
            None => template,
        }
    }

    /// Merge caller-supplied overrides over the defaults
    pub fn merge(&mut self, overrides: &MessageOverrides) {
        for (key, template) in &overrides.templates {
            self.templates.insert(key.clone(), template.clone());
        }
    }
}
