//! Form controller - evaluation passes and the submission gate
//!
//! One [`FormController`] owns everything mutable for one form: the handler
//! tri-state, the remote validation cache, the in-flight request table and
//! the invalid-field records of the last pass. The host feeds it triggering
//! events plus a fresh [`FormSnapshot`] per pass; nothing here is shared
//! across forms.
//!
//! The handler tri-state is the single source of truth for "may this
//! submission proceed": it resets to `Clear` at every pass start, any
//! invalid field sets it to `Blocked`, any outstanding remote check sets it
//! to `Pending`. A submission that found the handler `Pending` is replayed
//! by [`FormController::settle`] once the remote check resolves, via an
//! explicit re-run of the submit pass.

use crate::config::FormOptions;
use crate::evaluator::evaluate_field;
use crate::field::{Field, FormSnapshot};
use crate::messages::{MessageCatalog, MessageOverrides};
use crate::remote::{
    cache_key, RemoteCache, RemoteCacheState, RemoteCompletion, RemoteRequest, RemoteTransport,
    TransportError,
};
use crate::render::{ErrorRenderer, NullRenderer, Placement, VisualState};
use crate::validators::{ValidationError, ValidatorRegistry};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// The event that started an evaluation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The form is being submitted
    Submit,

    /// A configured real-time event (e.g. "change", "blur") fired
    RealTime(String),
}

/// Submission-gate tri-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// No blocking error
    Clear,

    /// A field is invalid; block submission
    Blocked,

    /// A remote result is outstanding; submission must wait
    Pending,
}

/// Outcome of one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Valid,
    Invalid,
    /// A remote check is outstanding; call [`FormController::settle`]
    Pending,
}

/// One invalid field recorded during a pass, for external inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFieldRecord {
    pub field_key: String,
    pub errors: Vec<String>,
}

/// Callback invoked with the triggering event at submit time
pub type EventCallback = Arc<dyn Fn(&TriggerEvent) + Send + Sync>;

/// Controller for one form
pub struct FormController {
    options: FormOptions,
    messages: MessageCatalog,
    registry: ValidatorRegistry,
    renderer: Arc<dyn ErrorRenderer>,
    transport: Option<Arc<dyn RemoteTransport>>,

    handler: Handler,
    cache: RemoteCache,
    completions_tx: UnboundedSender<RemoteCompletion>,
    completions_rx: UnboundedReceiver<RemoteCompletion>,
    invalid_fields: Vec<InvalidFieldRecord>,

    on_valid: Option<EventCallback>,
    on_error: Option<EventCallback>,
}

impl FormController {
    pub fn new(options: FormOptions) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            options,
            messages: MessageCatalog::default(),
            registry: ValidatorRegistry::new(),
            renderer: Arc::new(NullRenderer),
            transport: None,
            handler: Handler::Clear,
            cache: RemoteCache::new(),
            completions_tx,
            completions_rx,
            invalid_fields: Vec::new(),
            on_valid: None,
            on_error: None,
        }
    }

    /// Merge caller-supplied message templates over the defaults
    pub fn merge_messages(&mut self, overrides: &MessageOverrides) {
        self.messages.merge(overrides);
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn ErrorRenderer>) {
        self.renderer = renderer;
    }

    /// Transport collaborator for `remote[...]` rules
    pub fn set_transport(&mut self, transport: Arc<dyn RemoteTransport>) {
        self.transport = Some(transport);
    }

    /// Validator registry, for registering custom validators and
    /// pattern/callback/remote descriptors
    pub fn registry_mut(&mut self) -> &mut ValidatorRegistry {
        &mut self.registry
    }

    /// Called when a submit pass ends with no blocking error
    pub fn on_valid(&mut self, callback: EventCallback) {
        self.on_valid = Some(callback);
    }

    /// Called when a submit pass ends with at least one invalid field
    pub fn on_error(&mut self, callback: EventCallback) {
        self.on_error = Some(callback);
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// Invalid fields of the last pass
    pub fn invalid_fields(&self) -> &[InvalidFieldRecord] {
        &self.invalid_fields
    }

    /// Run a full evaluation pass and gate the submission
    ///
    /// On a `Submit` event the gate decides: `Pending` suppresses the
    /// submission silently (the decision is replayed by [`settle`]),
    /// `Blocked` fires `on_error`, `Clear` fires `on_valid`. Real-time
    /// events never fire the callbacks.
    ///
    /// [`settle`]: FormController::settle
    pub fn validate_form(
        &mut self,
        event: &TriggerEvent,
        form: &FormSnapshot,
    ) -> Result<PassOutcome, ValidationError> {
        let outcome = self.run_pass(event, form, None)?;
        if *event == TriggerEvent::Submit {
            match self.handler {
                Handler::Pending => {
                    debug!("⏳ Submission deferred; waiting for remote validation");
                }
                Handler::Blocked => {
                    if let Some(callback) = &self.on_error {
                        callback(event);
                    }
                }
                Handler::Clear => {
                    if let Some(callback) = &self.on_valid {
                        callback(event);
                    }
                }
            }
        }
        Ok(outcome)
    }

    /// Run a real-time pass for one field and its same-name group
    pub fn validate_field(
        &mut self,
        event: &TriggerEvent,
        form: &FormSnapshot,
        key: &str,
    ) -> Result<PassOutcome, ValidationError> {
        let field = form.field(key).ok_or_else(|| {
            ValidationError::RuntimeError(format!("Unknown field '{}'", key))
        })?;
        let targets: Vec<String> = form.group(&field.name).map(|f| f.key.clone()).collect();
        self.run_pass(event, form, Some(&targets))
    }

    /// Clear transient visual state and the handler
    ///
    /// The remote cache is retained; a reset never fabricates new requests
    /// for already-cached (field, value) pairs.
    pub fn reset(&mut self, form: &FormSnapshot) {
        self.handler = Handler::Clear;
        for field in form.fields() {
            self.renderer.close_window(&field.key);
            self.renderer.set_state(&field.key, VisualState::Clear);
        }
    }

    /// Raise an error on a field manually
    pub fn trigger_error(&mut self, form: &FormSnapshot, key: &str, message: &str) {
        let Some(field) = form.field(key) else { return };
        let scoped = self.options.scoped(field);
        self.renderer.close_window(key);
        self.renderer.set_state(key, VisualState::Clear);
        if scoped.show_error_messages {
            self.renderer.set_state(key, VisualState::Error);
            self.renderer.open_window(key, message, &Placement::from_options(&scoped));
        }
        self.handler = Handler::Blocked;
    }

    /// Await outstanding remote checks until the gate settles
    ///
    /// Processes completions while the handler is `Pending`. A resolution
    /// whose recorded trigger was `Submit` clears the handler and re-runs
    /// the submit pass, so the decision is re-derived with the now-cached
    /// outcome; that replay is the only path by which a deferred decision
    /// becomes final. Returns the settled outcome, or the transport failure
    /// if a remote check was rejected.
    ///
    /// Returns `Pending` when the last outstanding request was cancelled;
    /// its entry is evicted and a new pass re-issues the request.
    pub async fn settle(
        &mut self,
        form: &FormSnapshot,
    ) -> Result<PassOutcome, ValidationError> {
        while self.handler == Handler::Pending {
            // nothing in flight means nothing left to wait for
            if self.cache.inflight_len() == 0 {
                break;
            }
            let Some(completion) = self.completions_rx.recv().await else {
                break;
            };
            self.apply_completion(completion, form)?;
        }
        Ok(self.current_outcome())
    }

    fn current_outcome(&self) -> PassOutcome {
        match self.handler {
            Handler::Clear => PassOutcome::Valid,
            Handler::Blocked => PassOutcome::Invalid,
            Handler::Pending => PassOutcome::Pending,
        }
    }

    /// Gate state implied by the pass records once no check is outstanding
    fn settled_handler(&self) -> Handler {
        if self.invalid_fields.is_empty() {
            Handler::Clear
        } else {
            Handler::Blocked
        }
    }

    /// One evaluation pass over `targets` (all fields when `None`)
    fn run_pass(
        &mut self,
        event: &TriggerEvent,
        form: &FormSnapshot,
        targets: Option<&[String]>,
    ) -> Result<PassOutcome, ValidationError> {
        // pass reset: handler and visual state go first
        self.handler = Handler::Clear;
        self.invalid_fields.clear();

        let in_targets = |field: &Field| match targets {
            Some(keys) => keys.contains(&field.key),
            None => true,
        };

        for field in form.fields().iter().filter(|f| in_targets(f)) {
            self.renderer.close_window(&field.key);
            self.renderer.set_state(&field.key, VisualState::Clear);
        }

        for field in form.fields().iter().filter(|f| in_targets(f)) {
            if field.disabled {
                continue;
            }
            let scoped = self.options.scoped(field);
            let evaluation =
                evaluate_field(field, form, &self.registry, &self.messages, &scoped)?;

            if !evaluation.errors.is_empty() {
                self.fail_field(field, evaluation.errors);
            } else if let Some(descriptor_key) = evaluation.remote {
                self.check_remote(field, &descriptor_key, event)?;
            } else if evaluation.determined {
                self.renderer.set_state(&field.key, VisualState::Valid);
            }
        }

        Ok(self.current_outcome())
    }

    /// Record an invalid field, block the gate and emit its error window
    fn fail_field(&mut self, field: &Field, errors: Vec<String>) {
        self.handler = Handler::Blocked;
        self.invalid_fields
            .push(InvalidFieldRecord { field_key: field.key.clone(), errors: errors.clone() });

        let scoped = self.options.scoped(field);
        if scoped.show_error_messages {
            self.renderer.set_state(&field.key, VisualState::Error);
            self.renderer.open_window(
                &field.key,
                &errors.join("<br/>"),
                &Placement::from_options(&scoped),
            );
        }
    }

    /// Drive the remote cache state machine for one deferred field
    fn check_remote(
        &mut self,
        field: &Field,
        descriptor_key: &str,
        event: &TriggerEvent,
    ) -> Result<(), ValidationError> {
        let identity = field.remote_identity().to_string();
        let value = field.value.trimmed();
        let text = value.as_text().unwrap_or("").to_string();
        let key = cache_key(&identity, &text);

        match self.cache.entry(&key).map(|entry| entry.state.clone()) {
            // identical key already in flight: no second request
            Some(RemoteCacheState::Pending) => {
                self.cache.record_event(&key, event.clone());
                self.handler = Handler::Pending;
            }
            // terminal: the cached verdict answers without a round trip
            Some(RemoteCacheState::Resolved(verdict)) => {
                if verdict.valid {
                    self.renderer.set_state(&field.key, VisualState::Valid);
                } else {
                    self.fail_field(field, vec![verdict.message]);
                }
            }
            // terminal: re-raise the stored failure
            Some(RemoteCacheState::Rejected(message)) => {
                self.handler = Handler::Blocked;
                return Err(ValidationError::Transport { field: identity, message });
            }
            None => {
                let transport = self.transport.clone().ok_or_else(|| {
                    ValidationError::ConfigError(
                        "Remote rule used without a transport collaborator".to_string(),
                    )
                })?;
                let descriptor =
                    self.registry.custom().remote(descriptor_key).cloned().ok_or_else(|| {
                        ValidationError::ConfigError(format!(
                            "No remote validator registered as '{}'",
                            descriptor_key
                        ))
                    })?;
                let request = RemoteRequest::new(&descriptor, &identity, &text);
                self.renderer.set_state(&field.key, VisualState::Pending);
                self.cache.begin(
                    &identity,
                    key,
                    event.clone(),
                    request,
                    transport,
                    self.completions_tx.clone(),
                );
                self.handler = Handler::Pending;
            }
        }
        Ok(())
    }

    /// Apply one transport completion to the cache and the gate
    fn apply_completion(
        &mut self,
        completion: RemoteCompletion,
        form: &FormSnapshot,
    ) -> Result<(), ValidationError> {
        // stale generations are inert
        if !self.cache.accept(&completion) {
            return Ok(());
        }
        let Some(event) = self.cache.entry(&completion.key).map(|e| e.event.clone()) else {
            return Ok(());
        };

        let field = form
            .fields()
            .iter()
            .find(|field| field.remote_identity() == completion.field);
        if let Some(field) = field {
            self.renderer.set_state(&field.key, VisualState::Clear);
        }

        match completion.result {
            Ok(verdict) => {
                self.cache.resolve(&completion.key, verdict.clone());
                if event == TriggerEvent::Submit {
                    // the deferred submission is replayed so the gate
                    // re-derives its decision from the cached verdict
                    debug!("🔄 Replaying submit after remote resolution");
                    self.handler = Handler::Clear;
                    self.validate_form(&TriggerEvent::Submit, form)?;
                } else if let Some(field) = field {
                    if verdict.valid {
                        self.renderer.set_state(&field.key, VisualState::Valid);
                        // a valid remote verdict never clears blocks recorded
                        // for other fields in the same pass
                        self.handler = self.settled_handler();
                    } else {
                        self.fail_field(field, vec![verdict.message]);
                    }
                } else {
                    self.handler = self.settled_handler();
                }
            }
            // a cancelled request has no verdict; the entry is evicted so a
            // later pass re-issues it instead of waiting on a dead key
            Err(TransportError::Aborted) => {
                debug!("Remote request for key '{}' cancelled; entry evicted", completion.key);
                self.cache.evict(&completion.key);
            }
            Err(err) => {
                let message = err.to_string();
                warn!("❌ Remote validation rejected for field ({}): {}", completion.field, message);
                self.cache.reject(&completion.key, message.clone());
                self.handler = Handler::Blocked;
                return Err(ValidationError::Transport { field: completion.field, message });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("handler", &self.handler)
            .field("invalid_fields", &self.invalid_fields)
            .finish()
    }
}
