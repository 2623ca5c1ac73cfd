//! Presence check (`required`)

use crate::field::FieldKind;
use crate::validators::*;

/// `required` - the field must carry a value
///
/// Checkboxes must be checked, radio groups must have exactly one checked
/// member, multi-selects must have at least one selected option, everything
/// else must be non-empty after trimming.
pub struct RequiredValidator;

impl RequiredValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for RequiredValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let satisfied = match ctx.field.kind {
            FieldKind::Checkbox => ctx.field.checked,
            FieldKind::Radio => {
                ctx.form
                    .group(&ctx.field.name)
                    .filter(|field| field.checked)
                    .count()
                    == 1
            }
            FieldKind::SelectMultiple => ctx.value.selection_len() > 0,
            FieldKind::Text => !ctx.text().is_empty(),
        };
        if satisfied {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("required")))
        }
    }

    fn name(&self) -> &str {
        "required"
    }
}
