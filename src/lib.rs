// Skill Tracker - Core Library
// Widget catalog, tracked widget store and weight history, shared by the
// terminal UI and the placeholder server

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod weight;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use catalog::{WidgetCatalog, WidgetKind, WidgetTag, WidgetTemplate};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{Result, TrackerError};
pub use store::{TrackedWidget, TrackedWidgetStore, WidgetState};
pub use weight::{
    chart_points, current_date_label, derived_bmi, format_weight, parse_measurement, ChartPoint,
    WeightChart, WeightEntry, WeightProgress, WeightState, WeightSummary, MAX_ENTRIES,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
