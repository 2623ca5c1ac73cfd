//! Validator registry - central management of all validators

use super::*;
use crate::field::{Field, FieldValue};
use crate::remote::RemoteDescriptor;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Caller-registered pattern descriptor: a pre-compiled regex plus the
/// message recorded when it does not match
pub struct PatternDescriptor {
    pub regex: Regex,
    pub error_message: String,
}

/// Predicate invoked by `callback[key]`; truthy return means valid
pub type CallbackFn = Arc<dyn Fn(&Field, &FieldValue) -> bool + Send + Sync>;

/// Caller-registered callback descriptor
pub struct CallbackDescriptor {
    pub callback: CallbackFn,
    pub error_message: String,
}

/// Descriptor tables for the `pattern`, `callback` and `remote` built-ins,
/// keyed by the rule argument
#[derive(Default)]
pub struct CustomValidators {
    patterns: HashMap<String, PatternDescriptor>,
    callbacks: HashMap<String, CallbackDescriptor>,
    remotes: HashMap<String, RemoteDescriptor>,
}

impl CustomValidators {
    pub fn pattern(&self, key: &str) -> Option<&PatternDescriptor> {
        self.patterns.get(key)
    }

    pub fn callback(&self, key: &str) -> Option<&CallbackDescriptor> {
        self.callbacks.get(key)
    }

    pub fn remote(&self, key: &str) -> Option<&RemoteDescriptor> {
        self.remotes.get(key)
    }

    /// Register a pattern descriptor; the regex is compiled immediately
    pub fn register_pattern(
        &mut self,
        key: &str,
        pattern: &str,
        error_message: &str,
    ) -> Result<(), ValidationError> {
        let regex = Regex::new(pattern).map_err(|e| {
            ValidationError::ConfigError(format!("Invalid pattern for '{}': {}", key, e))
        })?;
        debug!("Registering pattern validator: {}", key);
        self.patterns.insert(
            key.to_string(),
            PatternDescriptor { regex, error_message: error_message.to_string() },
        );
        Ok(())
    }

    /// Register a callback descriptor
    pub fn register_callback(&mut self, key: &str, callback: CallbackFn, error_message: &str) {
        debug!("Registering callback validator: {}", key);
        self.callbacks.insert(
            key.to_string(),
            CallbackDescriptor { callback, error_message: error_message.to_string() },
        );
    }

    /// Register a remote descriptor
    pub fn register_remote(&mut self, key: &str, descriptor: RemoteDescriptor) {
        debug!("Registering remote validator: {} -> {}", key, descriptor.url);
        self.remotes.insert(key.to_string(), descriptor);
    }
}

/// Registry of all loaded validators
pub struct ValidatorRegistry {
    /// Loaded validators by method name
    validators: HashMap<String, Arc<dyn RuleValidator>>,

    /// Caller-registered descriptor tables
    custom: CustomValidators,
}

impl ValidatorRegistry {
    /// Create a new validator registry with all built-ins registered
    pub fn new() -> Self {
        let mut registry = Self {
            validators: HashMap::new(),
            custom: CustomValidators::default(),
        };
        registry.register_builtin_validators();
        registry
    }

    /// Register all built-in validators
    fn register_builtin_validators(&mut self) {
        info!("🔧 Registering built-in validators");

        self.register("required", Arc::new(builtin::RequiredValidator::new()));
        self.register("email", Arc::new(builtin::EmailValidator::new()));
        self.register("number", Arc::new(builtin::NumberValidator::new()));
        self.register("minLength", Arc::new(builtin::MinLengthValidator::new()));
        self.register("maxLength", Arc::new(builtin::MaxLengthValidator::new()));
        self.register("equalTo", Arc::new(builtin::EqualToValidator::new()));
        self.register("different", Arc::new(builtin::DifferentValidator::new()));
        self.register("creditCard", Arc::new(builtin::CreditCardValidator::new()));
        self.register("maxChecked", Arc::new(builtin::MaxCheckedValidator::new()));
        self.register("minChecked", Arc::new(builtin::MinCheckedValidator::new()));
        self.register("maxSelected", Arc::new(builtin::MaxSelectedValidator::new()));
        self.register("minSelected", Arc::new(builtin::MinSelectedValidator::new()));
        self.register("pattern", Arc::new(builtin::PatternValidator::new()));
        self.register("callback", Arc::new(builtin::CallbackValidator::new()));
        self.register("remote", Arc::new(builtin::RemoteValidator::new()));

        info!("✅ Registered {} built-in validators", self.validators.len());
    }

    /// Register a validator under a method name
    ///
    /// Caller-supplied validators may shadow built-ins.
    pub fn register(&mut self, method: &str, validator: Arc<dyn RuleValidator>) {
        debug!("Registering validator: {}", method);
        self.validators.insert(method.to_string(), validator);
    }

    /// Get a validator by method name
    pub fn get(&self, method: &str) -> Option<Arc<dyn RuleValidator>> {
        self.validators.get(method).cloned()
    }

    /// All registered method names
    #[allow(dead_code)]
    pub fn method_names(&self) -> Vec<String> {
        self.validators.keys().cloned().collect()
    }

    pub fn custom(&self) -> &CustomValidators {
        &self.custom
    }

    /// Register a pattern descriptor for `pattern[key]`
    pub fn register_pattern(
        &mut self,
        key: &str,
        pattern: &str,
        error_message: &str,
    ) -> Result<(), ValidationError> {
        self.custom.register_pattern(key, pattern, error_message)
    }

    /// Register a callback descriptor for `callback[key]`
    pub fn register_callback(&mut self, key: &str, callback: CallbackFn, error_message: &str) {
        self.custom.register_callback(key, callback, error_message);
    }

    /// Register a remote descriptor for `remote[key]`
    pub fn register_remote(&mut self, key: &str, descriptor: RemoteDescriptor) {
        self.custom.register_remote(key, descriptor);
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}
