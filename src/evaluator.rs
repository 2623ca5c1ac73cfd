//! Field evaluator - runs one field's declared rules
//!
//! Iterates the field's rule descriptors in declared order, collecting every
//! error rather than stopping at the first one. An empty text value skips
//! everything except `required` and `equalTo`; only presence and cross-field
//! equality are meaningful on empty input. Unknown method names are skipped
//! silently, which makes unrecognized rules a documented no-op rather than a
//! pass or a failure.

use crate::config::ScopedOptions;
use crate::field::{Field, FormSnapshot};
use crate::messages::MessageCatalog;
use crate::rules::parse_rules;
use crate::validators::{RuleContext, RuleOutcome, ValidationError, ValidatorRegistry};
use tracing::debug;

/// Result of evaluating one field's whole rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvaluation {
    /// Error messages in declared rule order
    pub errors: Vec<String>,

    /// Remote descriptor key, when a `remote` rule deferred
    ///
    /// Only consulted when `errors` is empty; synchronous failures win.
    pub remote: Option<String>,

    /// At least one rule produced a definite verdict
    ///
    /// False when every rule was skipped or not applicable; such a field is
    /// never marked visually valid.
    pub determined: bool,
}

/// Evaluate all rules of one field against the current pass
pub fn evaluate_field(
    field: &Field,
    form: &FormSnapshot,
    registry: &ValidatorRegistry,
    messages: &MessageCatalog,
    options: &ScopedOptions,
) -> Result<FieldEvaluation, ValidationError> {
    let value = field.value.trimmed();
    let mut evaluation = FieldEvaluation { errors: Vec::new(), remote: None, determined: false };

    for rule in parse_rules(&field.rules) {
        let method = rule.method.as_str();

        // empty values only answer to presence and cross-field equality
        if value.is_empty_text() && method != "required" && method != "equalTo" {
            continue;
        }

        let Some(validator) = registry.get(method) else {
            debug!("Skipping unknown rule '{}' on field ({})", method, field.key);
            continue;
        };

        let ctx = RuleContext {
            field,
            value: &value,
            argument: rule.argument.as_deref(),
            form,
            options,
            custom: registry.custom(),
            messages,
        };

        match validator.check(&ctx)? {
            RuleOutcome::Valid => evaluation.determined = true,
            RuleOutcome::Invalid { message } => {
                evaluation.determined = true;
                // a per-field override replaces the default before recording
                let message = field
                    .messages
                    .get(method)
                    .cloned()
                    .unwrap_or(message);
                evaluation.errors.push(message);
            }
            RuleOutcome::NotApplicable => {}
            RuleOutcome::Defer { descriptor } => evaluation.remote = Some(descriptor),
        }
    }

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormOptions;
    use crate::field::Field;

    fn evaluate(field: &Field, form: &FormSnapshot) -> FieldEvaluation {
        let registry = ValidatorRegistry::new();
        let messages = MessageCatalog::default();
        let options = FormOptions::default().scoped(field);
        evaluate_field(field, form, &registry, &messages, &options).unwrap()
    }

    fn evaluate_single(field: Field) -> FieldEvaluation {
        let form = FormSnapshot::new(vec![field.clone()]);
        evaluate(&field, &form)
    }

    #[test]
    fn test_invalid_email_yields_email_message_only() {
        let evaluation = evaluate_single(Field::text("email", "required,email", "foo@@bar"));
        assert_eq!(
            evaluation.errors,
            vec!["Your E-mail address appears to be invalid. Please be sure to check.".to_string()]
        );
    }

    #[test]
    fn test_empty_required_yields_required_message_only() {
        let evaluation = evaluate_single(Field::text("email", "required,email", ""));
        assert_eq!(
            evaluation.errors,
            vec!["This field is required. Please be sure to check.".to_string()]
        );
    }

    #[test]
    fn test_empty_value_skips_non_required_rules() {
        let evaluation =
            evaluate_single(Field::text("f", "email,number,minLength[4],creditCard", ""));
        assert!(evaluation.errors.is_empty());
        assert!(!evaluation.determined);
    }

    #[test]
    fn test_all_errors_collected_in_declared_order() {
        let evaluation = evaluate_single(Field::text("f", "email,minLength[20]", "foo@@bar"));
        assert_eq!(evaluation.errors.len(), 2);
        assert!(evaluation.errors[0].contains("E-mail"));
        assert!(evaluation.errors[1].contains("Minimum 20"));
    }

    #[test]
    fn test_unknown_rule_is_a_no_op() {
        let evaluation = evaluate_single(Field::text("f", "telepathy,number", "42"));
        assert!(evaluation.errors.is_empty());
        assert!(evaluation.determined);
    }

    #[test]
    fn test_per_field_message_override() {
        let field = Field::text("email", "required", "").with_message("required", "Give an e-mail");
        let evaluation = evaluate_single(field);
        assert_eq!(evaluation.errors, vec!["Give an e-mail".to_string()]);
    }

    #[test]
    fn test_shared_name_group_errors_once() {
        let form = FormSnapshot::new(vec![
            Field::checkbox("opt-1", "opts", "maxChecked[1]", true),
            Field::checkbox("opt-2", "opts", "maxChecked[1]", true),
        ]);
        let evaluations: Vec<FieldEvaluation> =
            form.fields().iter().map(|field| evaluate(field, &form)).collect();
        // one error, attributed to the first member only
        assert_eq!(evaluations[0].errors.len(), 1);
        assert!(evaluations[1].errors.is_empty());
    }

    #[test]
    fn test_remote_defers_when_no_sync_errors() {
        let mut registry = ValidatorRegistry::new();
        registry.register_remote(
            "checkEmail",
            crate::remote::RemoteDescriptor {
                method: "POST".to_string(),
                url: "/check-email".to_string(),
                extra: serde_json::Value::Null,
            },
        );
        let field = Field::text("email", "required,email,remote[checkEmail]", "a@b.co");
        let form = FormSnapshot::new(vec![field.clone()]);
        let messages = MessageCatalog::default();
        let options = FormOptions::default().scoped(&field);
        let evaluation =
            evaluate_field(&field, &form, &registry, &messages, &options).unwrap();
        assert!(evaluation.errors.is_empty());
        assert_eq!(evaluation.remote.as_deref(), Some("checkEmail"));
    }

    #[test]
    fn test_missing_remote_descriptor_is_config_error() {
        let field = Field::text("email", "remote[nope]", "a@b.co");
        let form = FormSnapshot::new(vec![field.clone()]);
        let registry = ValidatorRegistry::new();
        let messages = MessageCatalog::default();
        let options = FormOptions::default().scoped(&field);
        assert!(matches!(
            evaluate_field(&field, &form, &registry, &messages, &options),
            Err(ValidationError::ConfigError(_))
        ));
    }
}
