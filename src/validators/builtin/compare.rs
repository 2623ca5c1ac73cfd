//! Cross-field comparison (`equalTo`, `different`)

use crate::validators::*;

fn other_raw_value<'a>(
    ctx: &'a RuleContext<'_>,
    method: &str,
) -> Result<&'a str, ValidationError> {
    let name = ctx.required_arg(method)?;
    ctx.form.raw_text(name).ok_or_else(|| {
        ValidationError::ConfigError(format!(
            "Rule '{}' references unknown field '{}'",
            method, name
        ))
    })
}

/// `equalTo[other]` - this field's trimmed value must equal the named
/// field's current raw value
pub struct EqualToValidator;

impl EqualToValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EqualToValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for EqualToValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if other_raw_value(ctx, "equalTo")? == ctx.text() {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("notEqual")))
        }
    }

    fn name(&self) -> &str {
        "equalTo"
    }
}

/// `different[other]` - exact inverse of `equalTo`
pub struct DifferentValidator;

impl DifferentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DifferentValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for DifferentValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if other_raw_value(ctx, "different")? != ctx.text() {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("different")))
        }
    }

    fn name(&self) -> &str {
        "different"
    }
}
