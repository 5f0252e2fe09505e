// 📌 Tracked Widget Store - The user's pinned widgets, in display order
//
// "Template is shared VALUE, instance id is IDENTITY"
//
// - Instances are created from catalog templates and appended at the end
// - Ids are "instance-{template_id}-{counter}" with a strictly increasing
//   counter, so re-adding the same template never collides
// - Updates replace state in place; an unknown id is a silent no-op
// - There is no removal and no persistence: everything lives in memory

use crate::catalog::{WidgetKind, WidgetTemplate};
use crate::clock::{Clock, SystemClock};
use crate::weight::{current_date_label, parse_measurement, WeightState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

// ============================================================================
// WIDGET STATE
// ============================================================================

/// Value held by a tracked widget, decided by its template's kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetState {
    /// Numeric and Text widgets: the raw string the user typed
    Simple { value: String },

    /// Weight widgets
    Weight(WeightState),
}

impl WidgetState {
    /// Fresh state for a newly added widget of `kind`
    pub fn initial(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Weight => WidgetState::Weight(WeightState::new()),
            WidgetKind::Numeric | WidgetKind::Text => WidgetState::Simple {
                value: String::new(),
            },
        }
    }

    pub fn as_weight(&self) -> Option<&WeightState> {
        match self {
            WidgetState::Weight(w) => Some(w),
            WidgetState::Simple { .. } => None,
        }
    }

    pub fn as_simple(&self) -> Option<&str> {
        match self {
            WidgetState::Simple { value } => Some(value),
            WidgetState::Weight(_) => None,
        }
    }
}

// ============================================================================
// TRACKED WIDGET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedWidget {
    /// Unique per instance, never reused
    pub id: String,

    pub template: Arc<WidgetTemplate>,

    pub state: WidgetState,
}

impl TrackedWidget {
    pub fn is_weight(&self) -> bool {
        self.template.kind == WidgetKind::Weight
    }
}

// ============================================================================
// STORE
// ============================================================================

pub struct TrackedWidgetStore {
    widgets: Vec<TrackedWidget>,
    next_id: u64,
    clock: Box<dyn Clock>,
}

impl Default for TrackedWidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackedWidgetStore {
    /// Empty store labelling entries with the system clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        TrackedWidgetStore {
            widgets: Vec::new(),
            next_id: 0,
            clock,
        }
    }

    /// Pin a new instance of `template` at the end of the list
    pub fn add(&mut self, template: Arc<WidgetTemplate>) -> TrackedWidget {
        let id = format!("instance-{}-{}", template.id, self.next_id);
        self.next_id += 1;

        let widget = TrackedWidget {
            id,
            state: WidgetState::initial(template.kind),
            template,
        };
        debug!(id = %widget.id, "added widget");

        self.widgets.push(widget.clone());
        widget
    }

    /// Replace the state of widget `id`, keeping its position.
    ///
    /// Returns false (and changes nothing) when no such widget exists.
    pub fn update(&mut self, id: &str, new_state: WidgetState) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == id) {
            Some(widget) => {
                widget.state = new_state;
                trace!(id, "updated widget state");
                true
            }
            None => {
                debug!(id, "ignoring update for unknown widget");
                false
            }
        }
    }

    /// Quick-track a raw user value on widget `id`.
    ///
    /// Simple widgets store the trimmed text. Weight widgets parse it as
    /// kilograms and record today's entry; text that does not parse leaves the
    /// widget untouched. Returns whether the state changed.
    pub fn track_value(&mut self, id: &str, raw: &str) -> bool {
        let Some(widget) = self.get(id) else {
            debug!(id, "ignoring track for unknown widget");
            return false;
        };

        let value = raw.trim();
        let new_state = match &widget.state {
            WidgetState::Simple { .. } => WidgetState::Simple {
                value: value.to_string(),
            },
            WidgetState::Weight(weight) => match parse_measurement(value) {
                Ok(kg) => WidgetState::Weight(weight.add_entry_today(kg, self.clock.as_ref())),
                Err(e) => {
                    debug!(id, error = %e, "weight not recorded");
                    return false;
                }
            },
        };

        if new_state == widget.state {
            return false;
        }
        self.update(id, new_state)
    }

    pub fn get(&self, id: &str) -> Option<&TrackedWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Snapshot in display order
    pub fn list(&self) -> &[TrackedWidget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Date label for entries recorded now
    pub fn today_label(&self) -> String {
        current_date_label(self.clock.as_ref())
    }
}

// ============================================================================
// TESTS
// ============================================================================
