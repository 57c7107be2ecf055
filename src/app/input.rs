//! Strict input collection for the CLI and batch cases.
//!
//! The engine itself never rejects input; this layer is where malformed
//! dates and out-of-range scan measurements get reported to the user.

use crate::domain::model::LmpInput;
use crate::utils::error::Result;
use crate::utils::validation::{validate_date, validate_optional_date, validate_range};
use chrono::NaiveDate;

pub const DEFAULT_MIN_SCAN_WEEKS: u32 = 4;
pub const DEFAULT_MAX_SCAN_WEEKS: u32 = 14;
pub const MAX_SCAN_DAYS: u32 = 6;

/// Raw forward-method fields as typed by a user.
#[derive(Debug, Clone, Default)]
pub struct RawLmpFields<'a> {
    pub lmp: &'a str,
    pub ultrasound_date: Option<&'a str>,
    pub ga_weeks: Option<u32>,
    pub ga_days: Option<u32>,
}

pub fn validate_scan_measurement(
    ga_weeks: Option<u32>,
    ga_days: Option<u32>,
    (min_weeks, max_weeks): (u32, u32),
) -> Result<()> {
    if let Some(weeks) = ga_weeks {
        validate_range(
            "ga_weeks",
            i64::from(weeks),
            i64::from(min_weeks),
            i64::from(max_weeks),
        )?;
    }
    if let Some(days) = ga_days {
        validate_range("ga_days", i64::from(days), 0, i64::from(MAX_SCAN_DAYS))?;
    }
    Ok(())
}

pub fn lmp_input_from_raw(raw: &RawLmpFields<'_>, scan_week_bounds: (u32, u32)) -> Result<LmpInput> {
    let lmp_date = validate_date("lmp", raw.lmp)?;
    let ultrasound_date = validate_optional_date("ultrasound_date", raw.ultrasound_date)?;

    let input = LmpInput {
        lmp_date: Some(lmp_date),
        ultrasound_date,
        ga_weeks_at_scan: raw.ga_weeks,
        ga_days_at_scan: raw.ga_days,
    };

    // 只有完整的超音波資料會參與計算，範圍檢查也只針對它
    if input.ultrasound().is_some() {
        validate_scan_measurement(raw.ga_weeks, raw.ga_days, scan_week_bounds)?;
    } else if ultrasound_date.is_some() || raw.ga_weeks.is_some() || raw.ga_days.is_some() {
        tracing::warn!(
            "⚠️ Incomplete ultrasound data (need date, weeks and days); dating by LMP only"
        );
    }

    Ok(input)
}

pub fn edd_from_raw(edd: &str) -> Result<NaiveDate> {
    validate_date("edd", edd)
}
