//! Rendering interface
//!
//! The engine never touches a widget tree; it emits error-window requests
//! and visual-state changes through [`ErrorRenderer`], and the host draws
//! them however it likes. Message text may carry HTML (errors are joined
//! with `<br/>`).

use crate::config::{BubblePosition, DisplayMode, ScopedOptions};
use parking_lot::RwLock;

/// Placement hint for an error window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Positioned relative to the field
    Bubble {
        position: BubblePosition,
        gap_x: i32,
        gap_y: i32,
    },
    /// Inserted in normal layout flow
    Inline,
}

impl Placement {
    /// Derive the placement from a field's resolved options
    pub fn from_options(options: &ScopedOptions) -> Self {
        match options.display {
            DisplayMode::Bubble => Placement::Bubble {
                position: options.bubble_position,
                gap_x: options.bubble_gap_x,
                gap_y: options.bubble_gap_y,
            },
            DisplayMode::Inline => Placement::Inline,
        }
    }
}

/// Visual state of a field's container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Error,
    Valid,
    /// A remote check is in flight
    Pending,
    /// No class at all (pass reset)
    Clear,
}

/// Rendering collaborator
///
/// Implementations must tolerate repeated calls for the same field; the
/// engine closes windows at the start of every pass and reopens them as
/// errors are found.
pub trait ErrorRenderer: Send + Sync {
    /// Open (or replace) the error window for a field
    fn open_window(&self, field_key: &str, html: &str, placement: &Placement);

    /// Close the field's error window, if any
    fn close_window(&self, field_key: &str);

    /// Update the field's visual class state
    fn set_state(&self, field_key: &str, state: VisualState);
}

/// Renderer that draws nothing; the default
#[derive(Debug, Default)]
pub struct NullRenderer;

impl ErrorRenderer for NullRenderer {
    fn open_window(&self, _field_key: &str, _html: &str, _placement: &Placement) {}
    fn close_window(&self, _field_key: &str) {}
    fn set_state(&self, _field_key: &str, _state: VisualState) {}
}

/// One recorded render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Opened {
        field_key: String,
        html: String,
        placement: Placement,
    },
    Closed {
        field_key: String,
    },
    State {
        field_key: String,
        state: VisualState,
    },
}

/// Renderer that records every call, for hosts that drain the requests
/// themselves and for tests
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    events: RwLock<Vec<RenderEvent>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.read().clone()
    }

    /// Window-open events only
    pub fn opened(&self) -> Vec<RenderEvent> {
        self.events
            .read()
            .iter()
            .filter(|event| matches!(event, RenderEvent::Opened { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl ErrorRenderer for MemoryRenderer {
    fn open_window(&self, field_key: &str, html: &str, placement: &Placement) {
        self.events.write().push(RenderEvent::Opened {
            field_key: field_key.to_string(),
            html: html.to_string(),
            placement: placement.clone(),
        });
    }

    fn close_window(&self, field_key: &str) {
        self.events.write().push(RenderEvent::Closed { field_key: field_key.to_string() });
    }

    fn set_state(&self, field_key: &str, state: VisualState) {
        self.events
            .write()
            .push(RenderEvent::State { field_key: field_key.to_string(), state });
    }
}
