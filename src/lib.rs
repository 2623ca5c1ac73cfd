//! Validetta - declarative form validation engine
//!
//! Fields declare their rules as a comma-separated string such as
//! `"required,email,minLength[4]"`. The engine parses the rules, runs the
//! registered validators over a [`FormSnapshot`] of the form's current
//! state, and gates submission on the result. Remote checks (`remote[key]`)
//! run through a pluggable async transport with a per-(field, value) cache,
//! deduplication of identical in-flight requests and replay of submissions
//! that were deferred while a check was outstanding.
//!
//! # Quick start
//!
//! ```no_run
//! use validetta::{Field, FormController, FormOptions, FormSnapshot, TriggerEvent};
//!
//! let mut controller = FormController::new(FormOptions::default());
//! let form = FormSnapshot::new(vec![
//!     Field::text("email", "required,email", "a@b.co"),
//!     Field::text("age", "number,maxLength[3]", "42"),
//! ]);
//! let outcome = controller.validate_form(&TriggerEvent::Submit, &form).unwrap();
//! ```
//!
//! Rendering is abstract: implement [`ErrorRenderer`] to draw error windows
//! and field state classes in your UI, or use [`MemoryRenderer`] to drain
//! the render requests yourself.

pub mod config;
pub mod controller;
pub mod evaluator;
pub mod field;
pub mod messages;
pub mod remote;
pub mod render;
pub mod rules;
pub mod validators;

pub use config::{
    BubblePosition, DisplayMode, FieldConfig, FieldOverrides, FormConfig, FormOptions,
    ScopedOptions,
};
pub use controller::{
    EventCallback, FormController, Handler, InvalidFieldRecord, PassOutcome, TriggerEvent,
};
pub use evaluator::{evaluate_field, FieldEvaluation};
pub use field::{Field, FieldKind, FieldValue, FormSnapshot};
pub use messages::{MessageCatalog, MessageOverrides};
pub use remote::{
    RemoteDescriptor, RemoteRequest, RemoteTransport, RemoteVerdict, TransportError,
};
pub use render::{ErrorRenderer, MemoryRenderer, NullRenderer, Placement, VisualState};
pub use rules::{parse_rule, parse_rules, RuleDescriptor};
pub use validators::{
    CallbackFn, CustomValidators, RuleContext, RuleOutcome, RuleValidator, ValidationError,
    ValidatorRegistry,
};
