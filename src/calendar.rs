use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::model::CalendarHoliday;

/// Category holding the fixed public holidays.
pub const PUBLIC_HOLIDAYS: &str = "public-holidays";

/// Category holding the optional holidays a user may avail flexibly.
pub const FLEXIBLE: &str = "flexible";

/// Static holiday reference data: category name → ordered records.
/// Loaded once at startup; read-only afterwards.
pub struct CalendarSet {
    categories: HashMap<String, Vec<CalendarHoliday>>,
}

impl CalendarSet {
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let contents = std::fs::read_to_string(path).map_err(CalendarError::Io)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        let categories = serde_json::from_str(json).map_err(CalendarError::Parse)?;
        Ok(Self { categories })
    }

    pub fn from_map(categories: HashMap<String, Vec<CalendarHoliday>>) -> Self {
        Self { categories }
    }

    /// Records in `category` whose date falls in the inclusive window.
    /// Unknown categories yield an empty list.
    pub fn between(&self, category: &str, start: NaiveDate, end: NaiveDate) -> Vec<CalendarHoliday> {
        self.categories
            .get(category)
            .map(|days| {
                days.iter()
                    .filter(|h| h.date >= start && h.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum CalendarError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for CalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::Io(e) => write!(f, "calendar file unreadable: {e}"),
            CalendarError::Parse(e) => write!(f, "calendar file malformed: {e}"),
        }
    }
}

impl std::error::Error for CalendarError {}
