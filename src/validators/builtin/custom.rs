//! Caller-registered validators (`pattern`, `callback`, `remote`)
//!
//! These built-ins dispatch through the descriptor tables the caller filled
//! at registration time. A missing descriptor key is a configuration error,
//! never a silent pass.

use crate::validators::*;

/// `pattern[key]` - test the value against a registered regex descriptor
pub struct PatternValidator;

impl PatternValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatternValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for PatternValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let key = ctx.required_arg("pattern")?;
        let descriptor = ctx.custom.pattern(key).ok_or_else(|| {
            ValidationError::ConfigError(format!("No pattern validator registered as '{}'", key))
        })?;
        if descriptor.regex.is_match(ctx.text()) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(descriptor.error_message.clone()))
        }
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// `callback[key]` - invoke a registered predicate with the field and value
pub struct CallbackValidator;

impl CallbackValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CallbackValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for CallbackValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let key = ctx.required_arg("callback")?;
        let descriptor = ctx.custom.callback(key).ok_or_else(|| {
            ValidationError::ConfigError(format!("No callback validator registered as '{}'", key))
        })?;
        if (descriptor.callback)(ctx.field, ctx.value) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(descriptor.error_message.clone()))
        }
    }

    fn name(&self) -> &str {
        "callback"
    }
}

/// `remote[key]` - defer the verdict to an out-of-process check
///
/// Only records that the field needs the round trip; resolution happens in
/// the remote validation cache. The descriptor must exist up front.
pub struct RemoteValidator;

impl RemoteValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RemoteValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for RemoteValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let key = ctx.required_arg("remote")?;
        if ctx.custom.remote(key).is_none() {
            return Err(ValidationError::ConfigError(format!(
                "No remote validator registered as '{}'",
                key
            )));
        }
        Ok(RuleOutcome::Defer { descriptor: key.to_string() })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::remote::RemoteDescriptor;
    use crate::validators::builtin::testutil::Harness;
    use std::sync::Arc;

    #[test]
    fn test_pattern_dispatch() {
        let mut h = Harness::new(Field::text("zip", "pattern[zip]", "12345")).arg("zip");
        h.custom
            .register_pattern("zip", r"^\d{5}$", "Invalid zip code.")
            .unwrap();
        assert_eq!(
            PatternValidator::new().check(&h.ctx()).unwrap(),
            RuleOutcome::Valid
        );

        let mut h = Harness::new(Field::text("zip", "pattern[zip]", "12a45")).arg("zip");
        h.custom
            .register_pattern("zip", r"^\d{5}$", "Invalid zip code.")
            .unwrap();
        match PatternValidator::new().check(&h.ctx()).unwrap() {
            RuleOutcome::Invalid { message } => assert_eq!(message, "Invalid zip code."),
            other => panic!("expected invalid outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_pattern_key_fails_fast() {
        let h = Harness::new(Field::text("zip", "pattern[zip]", "12345")).arg("zip");
        assert!(matches!(
            PatternValidator::new().check(&h.ctx()),
            Err(ValidationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_callback_dispatch() {
        let mut h = Harness::new(Field::text("even", "callback[even]", "4")).arg("even");
        h.custom.register_callback(
            "even",
            Arc::new(|_field, value| {
                value
                    .as_text()
                    .and_then(|text| text.parse::<i64>().ok())
                    .is_some_and(|n| n % 2 == 0)
            }),
            "Must be even.",
        );
        assert_eq!(
            CallbackValidator::new().check(&h.ctx()).unwrap(),
            RuleOutcome::Valid
        );
    }

    #[test]
    fn test_remote_defers_with_descriptor_key() {
        let mut h = Harness::new(Field::text("email", "remote[checkEmail]", "a@b.co"))
            .arg("checkEmail");
        h.custom.register_remote(
            "checkEmail",
            RemoteDescriptor {
                method: "POST".to_string(),
                url: "/check-email".to_string(),
                extra: serde_json::Value::Null,
            },
        );
        assert_eq!(
            RemoteValidator::new().check(&h.ctx()).unwrap(),
            RuleOutcome::Defer { descriptor: "checkEmail".to_string() }
        );
    }

    #[test]
    fn test_missing_remote_key_fails_fast() {
        let h = Harness::new(Field::text("email", "remote[checkEmail]", "a@b.co"))
            .arg("checkEmail");
        assert!(matches!(
            RemoteValidator::new().check(&h.ctx()),
            Err(ValidationError::ConfigError(_))
        ));
    }
}
