//! Time-bucketed visit popularity for a place.

use serde::{Deserialize, Serialize};

use crate::types::table::Tabular;

/// How busy a place is in one hourly bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularTimeSlot {
    /// Day name as shown by the site (e.g. "Monday")
    pub day: String,

    /// Hour of day, 0-23
    pub hour: u8,

    /// Relative busyness, 0-100
    pub busyness: u8,
}

impl PopularTimeSlot {
    pub fn new(day: impl Into<String>, hour: u8, busyness: u8) -> Self {
        Self {
            day: day.into(),
            hour,
            busyness,
        }
    }
}

impl Tabular for PopularTimeSlot {
    const COLUMNS: &'static [&'static str] = &["day", "hour", "busyness"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.day.clone(),
            self.hour.to_string(),
            self.busyness.to_string(),
        ]
    }
}
