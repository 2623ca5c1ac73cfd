//! Core validator traits and interfaces
//!
//! This module defines the fundamental abstraction for the validator
//! framework. Rule validators are pure and synchronous; anything that needs
//! an out-of-process round trip returns [`RuleOutcome::Defer`] and is
//! resolved later by the remote validation cache.

use super::{RuleContext, RuleOutcome, ValidationError};

/// The core trait every rule validator implements
///
/// A validator inspects one field through the [`RuleContext`] and reports a
/// three-way outcome. It must not mutate anything and must not block.
pub trait RuleValidator: Send + Sync {
    /// Run the rule against the context's field
    ///
    /// # Returns
    /// * `Ok(RuleOutcome)` - the rule's verdict (valid, invalid, not
    ///   applicable, or deferred to a remote check)
    /// * `Err(ValidationError)` - if the rule could not be evaluated at all
    ///   (missing custom descriptor, unusable argument)
    fn check(&self, ctx: &RuleContext<'_>) -> Result<RuleOutcome, ValidationError>;

    /// Method name this validator is registered under (for logging)
    fn name(&self) -> &str;
}
