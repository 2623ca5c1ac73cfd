//! String length bounds (`minLength`, `maxLength`)

use crate::validators::*;

/// `minLength[n]` - at least `n` characters
///
/// An empty value passes; emptiness is `required`'s job.
pub struct MinLengthValidator;

impl MinLengthValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinLengthValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MinLengthValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let bound = ctx.numeric_arg("minLength")?;
        let length = ctx.text().chars().count();
        if length == 0 || length >= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("minLength")))
        }
    }

    fn name(&self) -> &str {
        "minLength"
    }
}

/// `maxLength[n]` - at most `n` characters
pub struct MaxLengthValidator;

impl MaxLengthValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaxLengthValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MaxLengthValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let bound = ctx.numeric_arg("maxLength")?;
        if ctx.text().chars().count() <= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("maxLength")))
        }
    }

    fn name(&self) -> &str {
        "maxLength"
    }
}
