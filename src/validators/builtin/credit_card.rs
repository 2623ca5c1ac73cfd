//! Credit card number check (Luhn)

use crate::validators::*;

/// `creditCard` - strips non-digits, requires at least 16 digits, then runs
/// the Luhn checksum. An empty value passes; emptiness is `required`'s job.
pub struct CreditCardValidator;

impl CreditCardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Luhn checksum over the digits, least-significant first: double every
    /// second digit, subtract 9 when the doubled value exceeds 9, sum all.
    fn luhn_sum(digits: &[u32]) -> u32 {
        digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &digit)| {
                if i % 2 == 1 {
                    let doubled = digit * 2;
                    if doubled > 9 { doubled - 9 } else { doubled }
                } else {
                    digit
                }
            })
            .sum()
    }
}

impl Default for CreditCardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for CreditCardValidator {
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError> {
        let text = ctx.text();
        if text.is_empty() {
            return Ok(RuleOutcome::Valid);
        }
        let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() < 16 {
            return Ok(RuleOutcome::invalid(ctx.message("creditCard")));
        }
        let sum = Self::luhn_sum(&digits);
        if sum > 0 && sum % 10 == 0 {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(ctx.message("creditCard")))
        }
    }

    fn name(&self) -> &str {
        "creditCard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::validators::builtin::testutil::Harness;

    fn outcome(value: &str) -> RuleOutcome {
        let harness = Harness::new(Field::text("card", "creditCard", value));
        CreditCardValidator::new().check(&harness.ctx()).unwrap()
    }

    #[test]
    fn test_valid_test_card() {
        assert_eq!(outcome("4539 1488 0343 6467"), RuleOutcome::Valid);
    }

    #[test]
    fn test_last_digit_off_by_one_fails() {
        assert!(outcome("4539 1488 0343 6468").is_invalid());
    }

    #[test]
    fn test_too_few_digits_fails() {
        assert!(outcome("4539 1488").is_invalid());
    }

    #[test]
    fn test_empty_value_passes() {
        assert_eq!(outcome(""), RuleOutcome::Valid);
    }
}
