//! Validator framework
//!
//! This module provides an extensible system for field validation with
//! built-in rules plus caller-registered pattern, callback and remote
//! validators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Validator Registry                │
//! ├─────────────────────────────────────────┤
//! │  • Built-ins registered at startup      │
//! │  • Caller extensions under any key      │
//! │  • Pattern/callback/remote descriptors  │
//! └────────┬────────────────────────────────┘
//!          │
//!          ├──> Built-in rules (required, email, lengths, ...)
//!          ├──> pattern[key]  - registered regex descriptors
//!          ├──> callback[key] - registered predicates
//!          └──> remote[key]   - deferred to the remote cache
//! ```
//!
//! Every validator is pure and synchronous; a rule whose verdict needs an
//! out-of-process round trip reports [`RuleOutcome::Defer`] and the remote
//! validation cache takes over.

pub mod builtin;
pub mod context;
pub mod registry;
pub mod result;
pub mod traits;

// Re-export commonly used types
pub use context::RuleContext;
pub use registry::{CallbackFn, CustomValidators, ValidatorRegistry};
pub use result::{RuleOutcome, ValidationError};
pub use traits::RuleValidator;
