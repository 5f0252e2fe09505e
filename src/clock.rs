// ⏰ Clock - Injectable source of "today"
// Date labels for weight entries come from here, never from Local::now() directly.

use chrono::{Local, NaiveDate};

/// Anything that can tell us the current local date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the process's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a single date (tests, demos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Build from year/month/day, `None` if the date does not exist
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_its_date() {
        let clock = FixedClock::ymd(2024, 10, 5).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());
    }

    #[test]
    fn test_fixed_clock_rejects_impossible_date() {
        assert!(FixedClock::ymd(2024, 2, 30).is_none());
    }
}
