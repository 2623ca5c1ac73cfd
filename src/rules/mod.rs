//! Rule-string parsing
//!
//! Fields declare their validations as a comma-separated rule list, e.g.
//! `"required,minLength[4],equalTo[password]"`. Each token is either a bare
//! method name or `name[argument]`. Parsing never fails: a malformed token
//! degrades to a bare method name and an unknown method is skipped later by
//! the registry lookup.

use regex::Regex;
use std::sync::OnceLock;

/// One parsed rule: method name plus optional argument
///
/// The argument carries a bound (`minLength[4]`), another field's name
/// (`equalTo[password]`) or a custom-validator key (`remote[checkUsername]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub method: String,
    pub argument: Option<String>,
}

/// `name[arg]` where name is letters and arg is word/bracket characters
fn rule_regex() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| Regex::new(r"^([a-zA-Z]+)\[([\w\[\]]+)\]").expect("rule regex is valid"))
}

/// Parse a single rule token
pub fn parse_rule(token: &str) -> RuleDescriptor {
    match rule_regex().captures(token) {
        Some(caps) => RuleDescriptor {
            method: caps[1].to_string(),
            argument: Some(caps[2].to_string()),
        },
        None => RuleDescriptor {
            method: token.to_string(),
            argument: None,
        },
    }
}

/// Parse a comma-separated rule list, preserving declaration order
pub fn parse_rules(list: &str) -> Vec<RuleDescriptor> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_rule)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_method() {
        let rule = parse_rule("required");
        assert_eq!(rule.method, "required");
        assert_eq!(rule.argument, None);
    }

    #[test]
    fn test_method_with_argument() {
        let rule = parse_rule("minLength[4]");
        assert_eq!(rule.method, "minLength");
        assert_eq!(rule.argument.as_deref(), Some("4"));
    }

    #[test]
    fn test_field_reference_argument() {
        let rule = parse_rule("equalTo[password]");
        assert_eq!(rule.method, "equalTo");
        assert_eq!(rule.argument.as_deref(), Some("password"));
    }

    #[test]
    fn test_malformed_token_degrades_to_bare_name() {
        // missing closing bracket does not match the rule pattern
        let rule = parse_rule("minLength[4");
        assert_eq!(rule.method, "minLength[4");
        assert_eq!(rule.argument, None);
    }

    #[test]
    fn test_rule_list_order_preserved() {
        let rules = parse_rules("required,email,maxLength[64]");
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].method, "required");
        assert_eq!(rules[1].method, "email");
        assert_eq!(rules[2].method, "maxLength");
        assert_eq!(rules[2].argument.as_deref(), Some("64"));
    }

    #[test]
    fn test_empty_tokens_dropped() {
        let rules = parse_rules("required,,email,");
        assert_eq!(rules.len(), 2);
    }
}
