// 🧩 Widget Catalog - Static list of trackable widget templates
//
// Templates are VALUES built once at startup and shared read-only by every
// tracked instance that points at them. The catalog has no mutation API.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

// ============================================================================
// WIDGET TAG
// ============================================================================

/// Skill area a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetTag {
    Fitness,
    Music,
    Language,
    Lifestyle,
}

impl WidgetTag {
    pub fn display_name(&self) -> &'static str {
        match self {
            WidgetTag::Fitness => "Fitness",
            WidgetTag::Music => "Music",
            WidgetTag::Language => "Language",
            WidgetTag::Lifestyle => "Lifestyle",
        }
    }
}

// ============================================================================
// WIDGET KIND
// ============================================================================

/// What sort of value a widget holds; decides the initial state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Dated weight history plus height
    Weight,
    /// Free-form numeric string ("3 x 10", "25")
    Numeric,
    /// Free text
    Text,
}

// ============================================================================
// WIDGET TEMPLATE
// ============================================================================

/// Immutable descriptor of a trackable metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetTemplate {
    /// Globally unique, stable id (e.g. "fitness_weight")
    pub id: String,

    pub name: String,

    pub description: String,

    pub tag: WidgetTag,

    pub kind: WidgetKind,
}

impl WidgetTemplate {
    pub fn new(id: &str, name: &str, description: &str, tag: WidgetTag, kind: WidgetKind) -> Self {
        WidgetTemplate {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            tag,
            kind,
        }
    }

    /// Case-insensitive match on name, description or tag display name
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tag.display_name().to_lowercase().contains(&query)
    }
}

// ============================================================================
// WIDGET CATALOG
// ============================================================================

static TEMPLATES: OnceLock<Vec<Arc<WidgetTemplate>>> = OnceLock::new();

/// Fixed catalog of widget templates
pub struct WidgetCatalog;

impl WidgetCatalog {
    /// All templates in display order (never empty)
    pub fn templates() -> &'static [Arc<WidgetTemplate>] {
        TEMPLATES.get_or_init(default_templates)
    }

    /// Look up a template by id
    pub fn find(id: &str) -> Option<Arc<WidgetTemplate>> {
        Self::templates().iter().find(|t| t.id == id).cloned()
    }

    /// Filter for the picker: a blank query returns everything, order preserved
    pub fn search(query: &str) -> Vec<Arc<WidgetTemplate>> {
        let query = query.trim();
        Self::templates()
            .iter()
            .filter(|t| query.is_empty() || t.matches(query))
            .cloned()
            .collect()
    }
}

fn default_templates() -> Vec<Arc<WidgetTemplate>> {
    vec![
        WidgetTemplate::new(
            "fitness_weight",
            "Weight tracker",
            "Log your weight and track trends over time",
            WidgetTag::Fitness,
            WidgetKind::Weight,
        ),
        WidgetTemplate::new(
            "fitness_sets",
            "Workout sets",
            "Track completed sets or reps for your main lift",
            WidgetTag::Fitness,
            WidgetKind::Numeric,
        ),
        WidgetTemplate::new(
            "music_minutes",
            "Practice minutes",
            "Target how long you want to rehearse today",
            WidgetTag::Music,
            WidgetKind::Numeric,
        ),
        WidgetTemplate::new(
            "language_phrase",
            "Phrase of the day",
            "Write down a new phrase you want to memorise",
            WidgetTag::Language,
            WidgetKind::Text,
        ),
    ]
    .into_iter()
    .map(Arc::new)
    .collect()
}

// ============================================================================
// TESTS
// ============================================================================
