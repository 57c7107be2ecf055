use crate::app::input::{DEFAULT_MAX_SCAN_WEEKS, DEFAULT_MIN_SCAN_WEEKS};
use crate::app::report::OutputFormat;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Effective settings after merging command-line flags over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub evaluation_date: Option<NaiveDate>,
    pub output_format: String,
    pub scan_week_bounds: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            evaluation_date: None,
            output_format: "text".to_string(),
            scan_week_bounds: (DEFAULT_MIN_SCAN_WEEKS, DEFAULT_MAX_SCAN_WEEKS),
        }
    }
}

impl Settings {
    pub fn format(&self) -> Result<OutputFormat> {
        self.output_format.parse()
    }
}
