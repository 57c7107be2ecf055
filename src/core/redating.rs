//! Redating rules for reconciling LMP and ultrasound dating
//! (ACOG Committee Opinion No. 700).

use crate::domain::model::{DatingSource, UltrasoundScan};
use chrono::{Days, NaiveDate};

/// 一般妊娠週期：LMP 到預產期 280 天
pub const PREGNANCY_LENGTH_DAYS: u64 = 280;

/// 低於此週數時不以超音波重新推算
pub const MIN_REDATING_WEEKS: i64 = 5;

/// Maximum discrepancy (days) tolerated before ultrasound may override LMP,
/// for a given LMP-based gestational age in completed weeks.
pub fn redating_threshold_days(lmp_ga_weeks: i64) -> i64 {
    match lmp_ga_weeks {
        i64::MIN..=4 => 0,
        5..=8 => 5,
        9..=13 => 7,
        14..=15 => 10,
        16..=21 => 14,
        _ => 21,
    }
}

/// Comparison of the two independent gestational age estimates at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedatingDecision {
    pub ultrasound_edd: NaiveDate,
    pub lmp_ga_days: i64,
    pub discrepancy_days: u64,
    pub threshold_days: i64,
    pub source: DatingSource,
}

impl RedatingDecision {
    pub fn redated(&self) -> bool {
        self.source == DatingSource::Ultrasound
    }
}

/// Signed shift of `date` by `days`; None when the result leaves the calendar range.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

pub fn ultrasound_edd(scan: &UltrasoundScan) -> Option<NaiveDate> {
    shift_days(
        scan.scan_date,
        PREGNANCY_LENGTH_DAYS as i64 - scan.measured_ga_days(),
    )
}

pub fn decide(lmp_date: NaiveDate, scan: &UltrasoundScan) -> Option<RedatingDecision> {
    let measured_ga_days = scan.measured_ga_days();
    let lmp_ga_days = (scan.scan_date - lmp_date).num_days();
    let discrepancy_days = (lmp_ga_days - measured_ga_days).unsigned_abs();

    let lmp_ga_weeks = lmp_ga_days.div_euclid(7);
    let threshold_days = redating_threshold_days(lmp_ga_weeks);

    let source = if lmp_ga_weeks >= MIN_REDATING_WEEKS && discrepancy_days as i64 > threshold_days
    {
        DatingSource::Ultrasound
    } else {
        DatingSource::LmpConfirmed
    };

    tracing::debug!(
        lmp_ga_days,
        measured_ga_days,
        discrepancy_days,
        threshold_days,
        source = %source,
        "redating decision"
    );

    Some(RedatingDecision {
        ultrasound_edd: ultrasound_edd(scan)?,
        lmp_ga_days,
        discrepancy_days,
        threshold_days,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scan(weeks: u32, days: u32) -> UltrasoundScan {
        UltrasoundScan {
            scan_date: date(2024, 2, 26),
            ga_weeks: weeks,
            ga_days: days,
        }
    }

    #[test]
    fn test_threshold_bands() {
        let expected = [
            (0, 0),
            (4, 0),
            (5, 5),
            (8, 5),
            (9, 7),
            (13, 7),
            (14, 10),
            (15, 10),
            (16, 14),
            (21, 14),
            (22, 21),
            (27, 21),
            (28, 21),
            (42, 21),
        ];
        for (weeks, threshold) in expected {
            assert_eq!(redating_threshold_days(weeks), threshold, "week {}", weeks);
        }
    }

    #[test]
    fn test_threshold_negative_weeks_never_redates() {
        assert_eq!(redating_threshold_days(-3), 0);
    }

    #[test]
    fn test_redates_when_discrepancy_exceeds_threshold() {
        let decision = decide(date(2024, 1, 1), &scan(9, 0)).unwrap();
        assert_eq!(decision.lmp_ga_days, 56);
        assert_eq!(decision.discrepancy_days, 7);
        assert_eq!(decision.threshold_days, 5);
        assert!(decision.redated());
        // 2024-02-26 + (280 - 63) 天
        assert_eq!(decision.ultrasound_edd, date(2024, 9, 30));
    }

    #[test]
    fn test_discrepancy_equal_to_threshold_keeps_lmp() {
        let decision = decide(date(2024, 1, 1), &scan(8, 5)).unwrap();
        assert_eq!(decision.discrepancy_days, 5);
        assert_eq!(decision.source, DatingSource::LmpConfirmed);
    }

    #[test]
    fn test_smaller_scan_measurement_also_redates() {
        let decision = decide(date(2024, 1, 1), &scan(7, 0)).unwrap();
        assert_eq!(decision.discrepancy_days, 7);
        assert_eq!(decision.source, DatingSource::Ultrasound);
    }

    #[test]
    fn test_below_five_weeks_never_redates() {
        // 掃描日距 LMP 只有 4 週 6 天
        let early = UltrasoundScan {
            scan_date: date(2024, 2, 4),
            ga_weeks: 12,
            ga_days: 0,
        };
        let decision = decide(date(2024, 1, 1), &early).unwrap();
        assert_eq!(decision.lmp_ga_days, 34);
        assert!(decision.discrepancy_days > 40);
        assert_eq!(decision.source, DatingSource::LmpConfirmed);
    }

    #[test]
    fn test_scan_before_lmp_is_computed_literally() {
        let before = UltrasoundScan {
            scan_date: date(2023, 12, 25),
            ga_weeks: 6,
            ga_days: 0,
        };
        let decision = decide(date(2024, 1, 1), &before).unwrap();
        assert_eq!(decision.lmp_ga_days, -7);
        assert_eq!(decision.discrepancy_days, 49);
        assert_eq!(decision.source, DatingSource::LmpConfirmed);
    }

    #[test]
    fn test_monotonic_within_band() {
        let lmp = date(2024, 1, 1);
        let mut flipped = false;
        for extra in 0..=6 {
            let decision = decide(lmp, &scan(8, extra)).unwrap();
            if flipped {
                assert!(decision.redated(), "flipped back at +{} days", extra);
            }
            flipped |= decision.redated();
        }
        assert!(flipped);
    }
}
