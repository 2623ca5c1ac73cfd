//! Validation context - data passed to validators

use crate::config::ScopedOptions;
use crate::field::{Field, FieldValue, FormSnapshot};
use crate::messages::MessageCatalog;
use crate::validators::registry::CustomValidators;
use crate::validators::ValidationError;

/// Context provided to a validator for one rule on one field
///
/// Borrows everything from the running evaluation pass: the field, its
/// trimmed value, the parsed rule argument, the full field set (for grouped
/// and cross-field rules) and the field's resolved scoped options.
pub struct RuleContext<'a> {
    /// The field under validation
    pub field: &'a Field,

    /// The field's value, trimmed for text fields
    pub value: &'a FieldValue,

    /// The rule's parsed argument, if any
    pub argument: Option<&'a str>,

    /// The full field set of this pass
    pub form: &'a FormSnapshot,

    /// Effective options for this field
    pub options: &'a ScopedOptions,

    /// Caller-registered pattern/callback/remote descriptors
    pub custom: &'a CustomValidators,

    /// Message catalog in effect for this pass
    pub messages: &'a MessageCatalog,
}

impl<'a> RuleContext<'a> {
    /// Trimmed text content of the value (empty for selections)
    pub fn text(&self) -> &str {
        self.value.as_text().unwrap_or("")
    }

    /// The rule argument, or a config error naming the method
    pub fn required_arg(&self, method: &str) -> Result<&str, ValidationError> {
        self.argument.ok_or_else(|| {
            ValidationError::ConfigError(format!("Rule '{}' requires an argument", method))
        })
    }

    /// The rule argument parsed as a numeric bound
    pub fn numeric_arg(&self, method: &str) -> Result<usize, ValidationError> {
        let arg = self.required_arg(method)?;
        arg.parse::<usize>().map_err(|_| {
            ValidationError::ConfigError(format!(
                "Rule '{}' requires a numeric argument, got '{}'",
                method, arg
            ))
        })
    }

    /// Default message for a method, `{count}` substituted with the argument
    pub fn message(&self, method: &str) -> String {
        self.messages.render(method, self.argument)
    }
}
