//! Configuration module
//!
//! This module handles global and per-field options, the layered override
//! resolution that produces an immutable per-field configuration before
//! evaluation, and loading of TOML-based form definitions.

mod config;

pub use config::{
    BubblePosition,
    DisplayMode,
    FieldConfig,
    FieldKindConfig,
    FieldOverrides,
    FormConfig,
    FormOptions,
    ScopedOptions,
};
