//! Format checks (`email`, `number`)

use crate::validators::*;
use regex::Regex;

/// `email` - permissive HTML5-style address check
///
/// Pattern from the WHATWG e-mail input state: a liberal local part, then a
/// dot-separated domain of 1-63 character labels.
pub struct EmailValidator {
    pattern: Regex,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )
            .expect("email regex is valid"),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for EmailValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if self.pattern.is_match(ctx.text()) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("email")))
        }
    }

    fn name(&self) -> &str {
        "email"
    }
}

/// `number` - optional sign, digits, optional single decimal point
pub struct NumberValidator {
    pattern: Regex,
}

impl NumberValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[-+]?(\d+|\d+\.?\d+)$").expect("number regex is valid"),
        }
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for NumberValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        if self.pattern.is_match(ctx.text()) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("number")))
        }
    }

    fn name(&self) -> &str {
        "number"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::validators::builtin::testutil::Harness;

    fn email_outcome(value: &str) -> RuleOutcome {
        let harness = Harness::new(Field::text("email", "email", value));
        EmailValidator::new().check(&harness.ctx()).unwrap()
    }

    fn number_outcome(value: &str) -> RuleOutcome {
        let harness = Harness::new(Field::text("amount", "number", value));
        NumberValidator::new().check(&harness.ctx()).unwrap()
    }

    #[test]
    fn test_email_accepts_plain_addresses() {
        assert_eq!(email_outcome("foo@bar.com"), RuleOutcome::Valid);
        assert_eq!(email_outcome("user.name+tag@sub.example.org"), RuleOutcome::Valid);
    }

    #[test]
    fn test_email_rejects_double_at() {
        assert!(email_outcome("foo@@bar").is_invalid());
        assert!(email_outcome("not-an-email").is_invalid());
    }

    #[test]
    fn test_number_accepts_signed_and_decimal() {
        assert_eq!(number_outcome("42"), RuleOutcome::Valid);
        assert_eq!(number_outcome("-42"), RuleOutcome::Valid);
        assert_eq!(number_outcome("+3.14"), RuleOutcome::Valid);
    }

    #[test]
    fn test_number_rejects_text() {
        assert!(number_outcome("12abc").is_invalid());
        assert!(number_outcome("1.2.3").is_invalid());
    }
}
