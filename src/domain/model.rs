use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 解析表單輸入的日期 (YYYY-MM-DD)，空字串或無效日期一律回傳 None
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatingMethod {
    Lmp,
    Edd,
}

impl fmt::Display for DatingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatingMethod::Lmp => write!(f, "LMP"),
            DatingMethod::Edd => write!(f, "EDD"),
        }
    }
}

/// Which estimate became authoritative, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatingSource {
    /// LMP only, no ultrasound available.
    #[serde(rename = "LMP")]
    Lmp,
    /// Ultrasound redated the pregnancy, or the EDD was supplied directly.
    #[serde(rename = "Ultrasound")]
    Ultrasound,
    /// Ultrasound agreed with LMP within the allowed discrepancy.
    #[serde(rename = "LMP_CONFIRMED")]
    LmpConfirmed,
}

impl DatingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatingSource::Lmp => "LMP",
            DatingSource::Ultrasound => "Ultrasound",
            DatingSource::LmpConfirmed => "LMP_CONFIRMED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatingSource::Lmp => "Dated by last menstrual period",
            DatingSource::Ultrasound => "Dated by ultrasound",
            DatingSource::LmpConfirmed => "LMP dating confirmed by ultrasound",
        }
    }
}

impl fmt::Display for DatingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sonographic gestational age measured at an early ultrasound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltrasoundScan {
    pub scan_date: NaiveDate,
    pub ga_weeks: u32,
    pub ga_days: u32,
}

impl UltrasoundScan {
    pub fn measured_ga_days(&self) -> i64 {
        i64::from(self.ga_weeks) * 7 + i64::from(self.ga_days)
    }
}

/// Forward-method input. Ultrasound fields only count when all three are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LmpInput {
    pub lmp_date: Option<NaiveDate>,
    pub ultrasound_date: Option<NaiveDate>,
    pub ga_weeks_at_scan: Option<u32>,
    pub ga_days_at_scan: Option<u32>,
}

impl LmpInput {
    pub fn lmp_only(lmp_date: NaiveDate) -> Self {
        Self {
            lmp_date: Some(lmp_date),
            ..Self::default()
        }
    }

    pub fn with_ultrasound(
        lmp_date: NaiveDate,
        ultrasound_date: NaiveDate,
        ga_weeks_at_scan: u32,
        ga_days_at_scan: u32,
    ) -> Self {
        Self {
            lmp_date: Some(lmp_date),
            ultrasound_date: Some(ultrasound_date),
            ga_weeks_at_scan: Some(ga_weeks_at_scan),
            ga_days_at_scan: Some(ga_days_at_scan),
        }
    }

    /// 從原始表單字串建立輸入，無法解析的欄位視為缺漏
    pub fn parse(
        lmp: Option<&str>,
        ultrasound_date: Option<&str>,
        ga_weeks: Option<&str>,
        ga_days: Option<&str>,
    ) -> Self {
        Self {
            lmp_date: lmp.and_then(parse_date),
            ultrasound_date: ultrasound_date.and_then(parse_date),
            ga_weeks_at_scan: ga_weeks.and_then(parse_count),
            ga_days_at_scan: ga_days.and_then(parse_count),
        }
    }

    pub fn ultrasound(&self) -> Option<UltrasoundScan> {
        match (
            self.ultrasound_date,
            self.ga_weeks_at_scan,
            self.ga_days_at_scan,
        ) {
            (Some(scan_date), Some(ga_weeks), Some(ga_days)) => Some(UltrasoundScan {
                scan_date,
                ga_weeks,
                ga_days,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDate {
    pub name: &'static str,
    pub date_range: String,
}

/// Complete dating result. Built fresh for every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyInfo {
    pub lmp_edd: NaiveDate,
    pub ultrasound_edd: NaiveDate,
    pub best_estimate_edd: NaiveDate,
    pub source: DatingSource,
    pub estimated_lmp: NaiveDate,
    pub evaluated_on: NaiveDate,
    pub gestational_age_weeks: u32,
    pub gestational_age_days: u32,
    pub conception_date: NaiveDate,
    pub trimester: u8,
    pub first_trimester_end: NaiveDate,
    pub second_trimester_end: NaiveDate,
    pub discrepancy_days: u64,
    pub milestone_dates: Vec<MilestoneDate>,
}

impl PregnancyInfo {
    pub fn total_gestational_days(&self) -> u32 {
        self.gestational_age_weeks * 7 + self.gestational_age_days
    }

    pub fn gestational_age_label(&self) -> String {
        format!(
            "{}w {}d",
            self.gestational_age_weeks, self.gestational_age_days
        )
    }

    /// Negative once the due date has passed.
    pub fn days_until_due(&self) -> i64 {
        (self.best_estimate_edd - self.evaluated_on).num_days()
    }
}
