//! Remote validation cache and transport interface
//!
//! A `remote[key]` rule defers its verdict to an out-of-process check. This
//! module owns that life cycle: a per-(field, value) cache entry goes
//! `pending -> resolved | rejected`, identical in-flight keys are never
//! requested twice, and starting a new key for a field aborts the field's
//! previous request. Completions arrive over a channel and carry a
//! generation counter so a superseded response can never write the cache
//! for the new key.
//!
//! The network itself is abstract: hosts implement [`RemoteTransport`].

use crate::controller::TriggerEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Caller-registered remote endpoint descriptor (from TOML/JSON or code)
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDescriptor {
    /// HTTP method hint for the transport
    #[serde(default = "default_remote_method")]
    pub method: String,

    /// Endpoint the transport should call
    pub url: String,

    /// Extra parameters forwarded verbatim to the transport
    #[serde(default)]
    pub extra: serde_json::Value,
}

fn default_remote_method() -> String {
    "POST".to_string()
}

/// One remote check request handed to the transport
#[derive(Debug, Clone, Serialize)]
pub struct RemoteRequest {
    pub method: String,
    pub url: String,
    pub extra: serde_json::Value,

    /// Payload: the field's identity and its current value
    pub field_name: String,
    pub value: String,
}

impl RemoteRequest {
    pub fn new(descriptor: &RemoteDescriptor, field_name: &str, value: &str) -> Self {
        Self {
            method: descriptor.method.clone(),
            url: descriptor.url.clone(),
            extra: descriptor.extra.clone(),
            field_name: field_name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Successful transport response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVerdict {
    pub valid: bool,

    #[serde(default)]
    pub message: String,
}

/// Transport failure classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection-level failure
    Network(String),

    /// The server answered with a non-success status
    Http { status: u16, reason: String },

    /// The request was cancelled before completing
    ///
    /// A stale-generation abort is dropped outright; a current-generation
    /// abort evicts the pending entry so a later pass can retry.
    Aborted,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Network error: {}", msg),
            TransportError::Http { status, reason } => {
                write!(f, "HTTP error: {} {}", status, reason)
            }
            TransportError::Aborted => write!(f, "Request aborted"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Transport collaborator for remote checks
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Perform one remote check
    async fn check(&self, request: RemoteRequest) -> Result<RemoteVerdict, TransportError>;
}

/// State of one cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCacheState {
    /// Request in flight
    Pending,

    /// Request finished; terminal for this key
    Resolved(RemoteVerdict),

    /// Transport failed; terminal for this key
    Rejected(String),
}

/// One cache entry, keyed by `"{field}:{value}"`
#[derive(Debug, Clone)]
pub struct RemoteCacheEntry {
    pub state: RemoteCacheState,

    /// The triggering event recorded for this key; a repeat trigger on a
    /// pending key only updates this
    pub event: TriggerEvent,
}

/// Completion message sent by a finished request task
#[derive(Debug)]
pub struct RemoteCompletion {
    pub field: String,
    pub key: String,
    pub generation: u64,
    pub result: Result<RemoteVerdict, TransportError>,
}

struct InFlightRequest {
    key: String,
    generation: u64,
    handle: JoinHandle<()>,
}

/// Cache key for a field identity and its current value
pub fn cache_key(field: &str, value: &str) -> String {
    format!("{}:{}", field, value)
}

/// The remote validation cache: entries plus the in-flight request table
///
/// At most one outstanding request per field; beginning a different key for
/// a field aborts its previous request. Generation counters make stale
/// completions inert.
#[derive(Default)]
pub struct RemoteCache {
    entries: HashMap<String, RemoteCacheEntry>,
    inflight: HashMap<String, InFlightRequest>,
    next_generation: u64,
}

impl RemoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &str) -> Option<&RemoteCacheEntry> {
        self.entries.get(key)
    }

    /// Record the latest triggering event on a pending key
    pub fn record_event(&mut self, key: &str, event: TriggerEvent) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.event = event;
        }
    }

    /// Create a pending entry and issue the transport request
    ///
    /// Any in-flight request for the same field (necessarily a different
    /// key; identical keys hit the cache first) is aborted. The aborted
    /// task sends no completion, and its superseded entry stays pending.
    pub fn begin(
        &mut self,
        field: &str,
        key: String,
        event: TriggerEvent,
        request: RemoteRequest,
        transport: Arc<dyn RemoteTransport>,
        completions: UnboundedSender<RemoteCompletion>,
    ) {
        if let Some(stale) = self.inflight.remove(field) {
            warn!("🚫 Aborting stale remote request for field ({}): {}", field, stale.key);
            stale.handle.abort();
        }

        self.entries
            .insert(key.clone(), RemoteCacheEntry { state: RemoteCacheState::Pending, event });

        self.next_generation += 1;
        let generation = self.next_generation;
        debug!("Issuing remote request for key '{}' (generation {})", key, generation);

        let task_field = field.to_string();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let result = transport.check(request).await;
            let _ = completions.send(RemoteCompletion {
                field: task_field,
                key: task_key,
                generation,
                result,
            });
        });

        self.inflight.insert(field.to_string(), InFlightRequest { key, generation, handle });
    }

    /// Generation guard for an arriving completion
    ///
    /// Accepts the completion only if it belongs to the field's current
    /// request; a stale completion must never touch the cache. Accepting
    /// clears the in-flight slot.
    pub fn accept(&mut self, completion: &RemoteCompletion) -> bool {
        match self.inflight.get(&completion.field) {
            Some(current)
                if current.generation == completion.generation
                    && current.key == completion.key =>
            {
                self.inflight.remove(&completion.field);
                true
            }
            _ => {
                debug!(
                    "Dropping stale remote completion for key '{}' (generation {})",
                    completion.key, completion.generation
                );
                false
            }
        }
    }

    /// `pending -> resolved`
    pub fn resolve(&mut self, key: &str, verdict: RemoteVerdict) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.state = RemoteCacheState::Resolved(verdict);
        }
    }

    /// `pending -> rejected`
    pub fn reject(&mut self, key: &str, message: String) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.state = RemoteCacheState::Rejected(message);
        }
    }

    /// Drop a cache entry; the next pass for this key starts fresh
    pub fn evict(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Number of outstanding requests across all fields
    pub fn inflight_len(&self) -> usize {
        self.inflight.len()
    }
}
