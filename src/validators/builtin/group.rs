//! Grouped-field bounds (`maxChecked`, `minChecked`, `maxSelected`,
//! `minSelected`)
//!
//! The checked rules count checked, non-disabled members of a name group.
//! Only the first enabled member of the group computes the result; every
//! other member reports [`RuleOutcome::NotApplicable`] so a group never
//! produces duplicate errors.

use crate::field::FieldValue;
use crate::validators::*;

/// True when this field is the group member that carries the verdict
fn is_group_leader(ctx: &RuleContext<'_>) -> bool {
    matches!(
        ctx.form.first_enabled_of_group(&ctx.field.name),
        Some(first) if first.key == ctx.field.key
    )
}

/// `maxChecked[n]` - at most `n` boxes checked in the group
///
/// With zero boxes checked the rule is not applicable; no error is raised
/// until something is checked.
pub struct MaxCheckedValidator;

impl MaxCheckedValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaxCheckedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MaxCheckedValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if !is_group_leader(ctx) {
            return Ok(RuleOutcome::NotApplicable);
        }
        let bound = ctx.numeric_arg("maxChecked")?;
        let count = ctx.form.checked_len(&ctx.field.name);
        if count == 0 {
            return Ok(RuleOutcome::NotApplicable);
        }
        if count <= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("maxChecked")))
        }
    }

    fn name(&self) -> &str {
        "maxChecked"
    }
}

/// `minChecked[n]` - at least `n` boxes checked in the group
pub struct MinCheckedValidator;

impl MinCheckedValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinCheckedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MinCheckedValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if !is_group_leader(ctx) {
            return Ok(RuleOutcome::NotApplicable);
        }
        let bound = ctx.numeric_arg("minChecked")?;
        if ctx.form.checked_len(&ctx.field.name) >= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("minChecked")))
        }
    }

    fn name(&self) -> &str {
        "minChecked"
    }
}

/// `maxSelected[n]` - at most `n` options selected in a multi-select
///
/// An empty selection is not applicable; nothing to bound yet.
pub struct MaxSelectedValidator;

impl MaxSelectedValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaxSelectedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MaxSelectedValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if matches!(ctx.value, FieldValue::Selection(None)) {
            return Ok(RuleOutcome::NotApplicable);
        }
        let bound = ctx.numeric_arg("maxSelected")?;
        if ctx.value.selection_len() <= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("maxSelected")))
        }
    }

    fn name(&self) -> &str {
        "maxSelected"
    }
}

/// `minSelected[n]` - at least `n` options selected in a multi-select
///
/// An empty selection counts as zero selected options, so `minSelected[0]`
/// passes on an empty selection.
pub struct MinSelectedValidator;

impl MinSelectedValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinSelectedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for MinSelectedValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let bound = ctx.numeric_arg("minSelected")?;
        if ctx.value.selection_len() >= bound {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("minSelected")))
        }
    }

    fn name(&self) -> &str {
        "minSelected"
    }
}
