// ⚖️ Weight Entry Model - Dated weight history, height, BMI
//
// Every operation here is pure: it takes a WeightState and returns a new one.
// Committing the result to the store is the caller's job.
//
// Invariants:
// - At most one entry per date label (a repeat label replaces, never duplicates)
// - At most MAX_ENTRIES entries, oldest first (eviction drops from the front)
// - Missing data is None, never a sentinel number

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

/// History cap per weight widget
pub const MAX_ENTRIES: usize = 20;

/// How many entries the history chart plots
pub const CHART_WINDOW: usize = 5;

/// Placeholder for a value that cannot be shown yet
pub const MISSING_VALUE: &str = "--";

// ============================================================================
// WEIGHT ENTRY
// ============================================================================

/// One dated weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Month abbreviation + zero-padded day, e.g. "Oct 05"
    pub date_label: String,

    pub kilograms: f64,
}

impl WeightEntry {
    pub fn new(date_label: impl Into<String>, kilograms: f64) -> Self {
        WeightEntry {
            date_label: date_label.into(),
            kilograms,
        }
    }
}

// ============================================================================
// WEIGHT STATE
// ============================================================================

/// How much a weight widget knows about its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightProgress {
    /// No entries and no height
    NoData,
    /// Either entries or height, not both
    Partial,
    /// Both present, BMI is computable
    Complete,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightState {
    pub height_cm: Option<f64>,

    /// Insertion order, oldest first
    pub entries: Vec<WeightEntry>,
}

impl WeightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `weight_kg` under `label`, replacing any entry with the same label
    pub fn add_entry(&self, weight_kg: f64, label: &str) -> WeightState {
        let mut entries: Vec<WeightEntry> = self
            .entries
            .iter()
            .filter(|e| e.date_label != label)
            .cloned()
            .collect();
        entries.push(WeightEntry::new(label, weight_kg));

        if entries.len() > MAX_ENTRIES {
            let overflow = entries.len() - MAX_ENTRIES;
            entries.drain(..overflow);
        }

        WeightState {
            height_cm: self.height_cm,
            entries,
        }
    }

    /// Same as `add_entry`, labelled with today's date from `clock`
    pub fn add_entry_today(&self, weight_kg: f64, clock: &dyn Clock) -> WeightState {
        self.add_entry(weight_kg, &current_date_label(clock))
    }

    pub fn update_height(&self, height_cm: Option<f64>) -> WeightState {
        WeightState {
            height_cm,
            entries: self.entries.clone(),
        }
    }

    /// Parse-or-ignore height edit: unparseable text keeps the current height
    pub fn apply_height_input(&self, text: &str) -> WeightState {
        match parse_measurement(text) {
            Ok(height) => self.update_height(Some(height)),
            Err(_) => self.clone(),
        }
    }

    pub fn latest_weight(&self) -> Option<f64> {
        self.entries.last().map(|e| e.kilograms)
    }

    pub fn bmi(&self) -> Option<f64> {
        derived_bmi(self.latest_weight(), self.height_cm)
    }

    pub fn progress(&self) -> WeightProgress {
        match (self.entries.is_empty(), self.height_cm.is_some()) {
            (true, false) => WeightProgress::NoData,
            (false, true) if self.bmi().is_some() => WeightProgress::Complete,
            _ => WeightProgress::Partial,
        }
    }

    pub fn summary(&self) -> WeightSummary {
        WeightSummary::from_state(self)
    }

    /// Apply the detail screen's two text fields in one go.
    ///
    /// Height is applied first, then a weight entry under `label`. Both fields
    /// are parse-or-ignore. Returns `None` when nothing changed, so callers can
    /// skip the store update entirely.
    pub fn apply_detail_edits(
        &self,
        height_text: &str,
        weight_text: &str,
        label: &str,
    ) -> Option<WeightState> {
        let with_height = self.apply_height_input(height_text);
        let updated = match parse_measurement(weight_text) {
            Ok(weight) => with_height.add_entry(weight, label),
            Err(_) => with_height,
        };

        if updated == *self {
            None
        } else {
            Some(updated)
        }
    }
}

// ============================================================================
// DERIVED VALUES
// ============================================================================

/// Body-mass index, defined only for a known weight and a positive height
pub fn derived_bmi(latest_weight: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = latest_weight?;
    let height = height_cm?;
    if !height.is_finite() || height <= 0.0 || !weight.is_finite() {
        return None;
    }

    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);
    bmi.is_finite().then_some(bmi)
}

/// One decimal place, half-up, no trailing ".0"
///
/// `72.0 -> "72"`, `72.45 -> "72.5"`, `70.05 -> "70.1"`
pub fn format_weight(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_VALUE.to_string();
    }

    let rounded = (value * 10.0 + 0.5).floor() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// "Oct 05" style label for the clock's current local date
pub fn current_date_label(clock: &dyn Clock) -> String {
    clock.today().format("%b %d").to_string()
}

/// Parse a user-typed measurement ("72.5", " 180 ")
pub fn parse_measurement(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrackerError::InvalidNumber(trimmed.to_string())),
    }
}

// ============================================================================
// SUMMARY ROW
// ============================================================================

/// Display strings for the detail screen's summary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightSummary {
    pub bmi: String,
    pub height: String,
    pub weight: String,
}

impl WeightSummary {
    pub fn from_state(state: &WeightState) -> Self {
        let latest = state.latest_weight();
        WeightSummary {
            bmi: derived_bmi(latest, state.height_cm)
                .map(format_weight)
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            height: state
                .height_cm
                .map(|h| format!("{} cm", format_weight(h)))
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            weight: latest
                .map(|w| format!("{} kg", format_weight(w)))
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        }
    }
}

// ============================================================================
// CHART DATA
// ============================================================================

/// One plotted point; `x` and `y` are both in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub kilograms: f64,
    pub x: f64,
    pub y: f64,
}

/// Normalized data for the "Last 5 entries" chart
#[derive(Debug, Clone, PartialEq)]
pub struct WeightChart {
    pub range_min: f64,
    pub range_max: f64,
    pub points: Vec<ChartPoint>,
    /// True when the history was empty and sample data is shown instead
    pub is_sample: bool,
}

impl WeightChart {
    /// Chart the last `CHART_WINDOW` entries, falling back to sample data
    pub fn for_entries(entries: &[WeightEntry]) -> Self {
        if entries.is_empty() {
            let mut chart = chart_points(&sample_entries());
            chart.is_sample = true;
            return chart;
        }
        let start = entries.len().saturating_sub(CHART_WINDOW);
        chart_points(&entries[start..])
    }
}

/// Normalize `entries` as given (no windowing) onto a unit square
pub fn chart_points(entries: &[WeightEntry]) -> WeightChart {
    let values = entries.iter().map(|e| e.kilograms);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    let (range_min, range_max) = if entries.is_empty() {
        (-1.0, 1.0)
    } else {
        (min - 1.0, max + 1.0)
    };
    let range = (range_max - range_min).max(1.0);

    let step = if entries.len() < 2 {
        0.0
    } else {
        1.0 / (entries.len() - 1) as f64
    };

    let points = entries
        .iter()
        .enumerate()
        .map(|(i, e)| ChartPoint {
            label: e.date_label.clone(),
            kilograms: e.kilograms,
            x: step * i as f64,
            y: (e.kilograms - range_min) / range,
        })
        .collect();

    WeightChart {
        range_min,
        range_max,
        points,
        is_sample: false,
    }
}

/// Preview history shown before the first real entry
pub fn sample_entries() -> Vec<WeightEntry> {
    vec![
        WeightEntry::new("Sep 01", 72.0),
        WeightEntry::new("Sep 12", 71.4),
        WeightEntry::new("Sep 24", 71.0),
        WeightEntry::new("Oct 05", 70.6),
        WeightEntry::new("Oct 20", 70.1),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use proptest::prelude::*;

    fn labels(state: &WeightState) -> Vec<String> {
        state.entries.iter().map(|e| e.date_label.clone()).collect()
    }

    #[test]
    fn test_add_entry_appends() {
        let state = WeightState::new().add_entry(72.5, "Oct 05").add_entry(72.1, "Oct 06");
        assert_eq!(labels(&state), vec!["Oct 05", "Oct 06"]);
        assert_eq!(state.latest_weight(), Some(72.1));
    }

    #[test]
    fn test_add_entry_same_label_replaces() {
        let state = WeightState::new().add_entry(72.5, "Oct 05").add_entry(71.9, "Oct 05");
        assert_eq!(state.entries, vec![WeightEntry::new("Oct 05", 71.9)]);
    }

    #[test]
    fn test_add_entry_replacement_moves_to_end() {
        let state = WeightState::new()
            .add_entry(72.0, "Oct 05")
            .add_entry(71.5, "Oct 06")
            .add_entry(71.8, "Oct 05");
        assert_eq!(labels(&state), vec!["Oct 06", "Oct 05"]);
        assert_eq!(state.latest_weight(), Some(71.8));
    }

    #[test]
    fn test_add_entry_is_idempotent_for_same_label_and_value() {
        let once = WeightState::new().add_entry(70.0, "Oct 05");
        let twice = once.add_entry(70.0, "Oct 05");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_entry_caps_history() {
        let mut state = WeightState::new();
        for day in 1..=25 {
            state = state.add_entry(70.0 + day as f64 / 10.0, &format!("Day {:02}", day));
        }

        assert_eq!(state.entries.len(), MAX_ENTRIES);
        let expected: Vec<String> = (6..=25).map(|d| format!("Day {:02}", d)).collect();
        assert_eq!(labels(&state), expected);
    }

    #[test]
    fn test_add_entry_keeps_height() {
        let state = WeightState::new().update_height(Some(180.0)).add_entry(80.0, "Oct 05");
        assert_eq!(state.height_cm, Some(180.0));
    }

    #[test]
    fn test_add_entry_today_uses_clock() {
        let clock = FixedClock::ymd(2024, 10, 5).unwrap();
        let state = WeightState::new().add_entry_today(72.5, &clock);
        assert_eq!(state.entries[0].date_label, "Oct 05");
    }

    #[test]
    fn test_current_date_label_pads_day() {
        let clock = FixedClock::ymd(2025, 3, 9).unwrap();
        assert_eq!(current_date_label(&clock), "Mar 09");

        let clock = FixedClock::ymd(2025, 12, 31).unwrap();
        assert_eq!(current_date_label(&clock), "Dec 31");
    }

    #[test]
    fn test_update_height() {
        let state = WeightState::new().update_height(Some(175.0));
        assert_eq!(state.height_cm, Some(175.0));
        assert_eq!(state.update_height(None).height_cm, None);
    }

    #[test]
    fn test_invalid_height_input_keeps_previous() {
        let state = WeightState::new().update_height(Some(175.0));
        assert_eq!(state.apply_height_input("tall").height_cm, Some(175.0));
        assert_eq!(state.apply_height_input("").height_cm, Some(175.0));

        let unset = WeightState::new();
        assert_eq!(unset.apply_height_input("abc").height_cm, None);
        assert_eq!(unset.apply_height_input(" 182.5 ").height_cm, Some(182.5));
    }

    #[test]
    fn test_latest_weight_empty() {
        assert_eq!(WeightState::new().latest_weight(), None);
    }

    #[test]
    fn test_derived_bmi() {
        let bmi = derived_bmi(Some(70.0), Some(175.0)).unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
        assert_eq!(format_weight(bmi), "22.9");
    }

    #[test]
    fn test_derived_bmi_undefined() {
        assert_eq!(derived_bmi(Some(70.0), None), None);
        assert_eq!(derived_bmi(None, Some(175.0)), None);
        assert_eq!(derived_bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(derived_bmi(Some(70.0), Some(-170.0)), None);
        assert_eq!(derived_bmi(Some(70.0), Some(f64::NAN)), None);
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(72.0), "72");
        assert_eq!(format_weight(72.45), "72.5");
        assert_eq!(format_weight(70.05), "70.1");
        assert_eq!(format_weight(71.95), "72");
        assert_eq!(format_weight(68.04), "68");
        assert_eq!(format_weight(f64::NAN), "--");
    }

    #[test]
    fn test_format_weight_huge_values_do_not_saturate() {
        assert_eq!(format_weight(1e20), "100000000000000000000");
        assert_eq!(format_weight(-250.0), "-250");
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement(" 72.5 ").unwrap(), 72.5);
        assert!(matches!(
            parse_measurement("seventy"),
            Err(TrackerError::InvalidNumber(_))
        ));
        assert!(parse_measurement("inf").is_err());
    }

    #[test]
    fn test_progress_states() {
        let empty = WeightState::new();
        assert_eq!(empty.progress(), WeightProgress::NoData);

        let partial = empty.add_entry(70.0, "Oct 05");
        assert_eq!(partial.progress(), WeightProgress::Partial);
        assert_eq!(empty.update_height(Some(170.0)).progress(), WeightProgress::Partial);

        let complete = partial.update_height(Some(170.0));
        assert_eq!(complete.progress(), WeightProgress::Complete);
    }

    #[test]
    fn test_summary_strings() {
        let summary = WeightState::new().summary();
        assert_eq!(summary.bmi, "--");
        assert_eq!(summary.height, "--");
        assert_eq!(summary.weight, "--");

        let summary = WeightState::new()
            .update_height(Some(175.0))
            .add_entry(70.0, "Oct 05")
            .summary();
        assert_eq!(summary.bmi, "22.9");
        assert_eq!(summary.height, "175 cm");
        assert_eq!(summary.weight, "70 kg");
    }

    #[test]
    fn test_apply_detail_edits() {
        let state = WeightState::new();

        let updated = state.apply_detail_edits("180", "81.2", "Oct 05").unwrap();
        assert_eq!(updated.height_cm, Some(180.0));
        assert_eq!(updated.entries, vec![WeightEntry::new("Oct 05", 81.2)]);

        // Garbage in both fields: nothing to commit
        assert_eq!(updated.apply_detail_edits("x", "", "Oct 05"), None);

        // Re-saving identical values is not a change either
        assert_eq!(updated.apply_detail_edits("180", "81.2", "Oct 05"), None);

        let weight_only = state.apply_detail_edits("", "75", "Oct 06").unwrap();
        assert_eq!(weight_only.height_cm, None);
        assert_eq!(weight_only.latest_weight(), Some(75.0));
    }

    #[test]
    fn test_chart_points_normalization() {
        let entries = vec![
            WeightEntry::new("Oct 01", 70.0),
            WeightEntry::new("Oct 02", 72.0),
            WeightEntry::new("Oct 03", 71.0),
        ];
        let chart = chart_points(&entries);

        assert_eq!(chart.range_min, 69.0);
        assert_eq!(chart.range_max, 73.0);
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = chart.points.iter().map(|p| p.y).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);
        assert_eq!(ys, vec![0.25, 0.75, 0.5]);
    }

    #[test]
    fn test_chart_single_point_has_zero_step() {
        let chart = chart_points(&[WeightEntry::new("Oct 01", 70.0)]);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].x, 0.0);
        assert_eq!(chart.points[0].y, 0.5);
    }

    #[test]
    fn test_chart_window_takes_last_five() {
        let mut state = WeightState::new();
        for day in 1..=8 {
            state = state.add_entry(70.0 + day as f64, &format!("Oct {:02}", day));
        }
        let chart = WeightChart::for_entries(&state.entries);
        let plotted: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(plotted, vec!["Oct 04", "Oct 05", "Oct 06", "Oct 07", "Oct 08"]);
        assert!(!chart.is_sample);
    }

    #[test]
    fn test_chart_empty_history_uses_sample() {
        let chart = WeightChart::for_entries(&[]);
        assert!(chart.is_sample);
        assert_eq!(chart.points.len(), sample_entries().len());
    }

    proptest! {
        #[test]
        fn prop_history_is_bounded_and_unique(
            ops in proptest::collection::vec((0u8..30, 40.0f64..150.0), 0..80)
        ) {
            let mut state = WeightState::new();
            for (day, kg) in &ops {
                state = state.add_entry(*kg, &format!("Day {:02}", day));
            }

            prop_assert!(state.entries.len() <= MAX_ENTRIES);

            let mut seen = std::collections::HashSet::new();
            for entry in &state.entries {
                prop_assert!(seen.insert(entry.date_label.clone()));
            }

            // Each surviving label holds the last value written for it
            for entry in &state.entries {
                let last = ops
                    .iter()
                    .rev()
                    .find(|(day, _)| format!("Day {:02}", day) == entry.date_label)
                    .map(|(_, kg)| *kg);
                prop_assert_eq!(last, Some(entry.kilograms));
            }
        }

        #[test]
        fn prop_bmi_never_nan(weight in -500.0f64..500.0, height in -300.0f64..300.0) {
            if let Some(bmi) = derived_bmi(Some(weight), Some(height)) {
                prop_assert!(bmi.is_finite());
                prop_assert!(height > 0.0);
            }
        }
    }
}
