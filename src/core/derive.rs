use crate::core::milestones::{
    GestationalOffset, Milestone, FIRST_TRIMESTER_END, MILESTONE_CATALOG, SECOND_TRIMESTER_END,
};
use crate::domain::model::{DatingSource, MilestoneDate, PregnancyInfo};
use chrono::{Datelike, Days, NaiveDate};

/// Everything the entry points settle before the shared derivation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatingAnchor {
    pub estimated_lmp: NaiveDate,
    pub conception_date: NaiveDate,
    pub lmp_edd: NaiveDate,
    pub ultrasound_edd: NaiveDate,
    pub best_estimate_edd: NaiveDate,
    pub source: DatingSource,
    pub discrepancy_days: u64,
}

fn offset_date(estimated_lmp: NaiveDate, offset: GestationalOffset) -> Option<NaiveDate> {
    estimated_lmp.checked_add_days(Days::new(offset.total_days()))
}

const SINGLE_DATE_FORMAT: &str = "%b %-d, %Y";
const SHORT_DATE_FORMAT: &str = "%b %-d";

/// "Jul 14, 2024", "Jul 14 – Aug 3, 2024" or "Dec 20, 2024 – Jan 5, 2025".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format(SINGLE_DATE_FORMAT).to_string()
    } else if start.year() == end.year() {
        format!(
            "{} – {}",
            start.format(SHORT_DATE_FORMAT),
            end.format(SINGLE_DATE_FORMAT)
        )
    } else {
        format!(
            "{} – {}",
            start.format(SINGLE_DATE_FORMAT),
            end.format(SINGLE_DATE_FORMAT)
        )
    }
}

pub fn milestone_date(estimated_lmp: NaiveDate, milestone: &Milestone) -> Option<MilestoneDate> {
    let start = offset_date(estimated_lmp, milestone.start)?;
    let end = offset_date(estimated_lmp, milestone.end)?;
    Some(MilestoneDate {
        name: milestone.name,
        date_range: format_date_range(start, end),
    })
}

/// 目前孕期：剛好落在截止日當天仍屬前一期
pub fn trimester_on(today: NaiveDate, first_end: NaiveDate, second_end: NaiveDate) -> u8 {
    if today > second_end {
        3
    } else if today > first_end {
        2
    } else {
        1
    }
}

/// Gestational age in (weeks, days), clamped at zero for a future LMP.
pub fn gestational_age_on(today: NaiveDate, estimated_lmp: NaiveDate) -> (u32, u32) {
    let age_days = (today - estimated_lmp).num_days().max(0);
    let age_days = u32::try_from(age_days).unwrap_or(u32::MAX);
    (age_days / 7, age_days % 7)
}

/// Shared derivation: every downstream date comes from `anchor.estimated_lmp`.
pub fn derive_pregnancy_info(anchor: DatingAnchor, today: NaiveDate) -> Option<PregnancyInfo> {
    let estimated_lmp = anchor.estimated_lmp;
    let (gestational_age_weeks, gestational_age_days) = gestational_age_on(today, estimated_lmp);

    let first_trimester_end = offset_date(estimated_lmp, FIRST_TRIMESTER_END)?;
    let second_trimester_end = offset_date(estimated_lmp, SECOND_TRIMESTER_END)?;
    let trimester = trimester_on(today, first_trimester_end, second_trimester_end);

    let milestone_dates = MILESTONE_CATALOG
        .iter()
        .map(|m| milestone_date(estimated_lmp, m))
        .collect::<Option<Vec<_>>>()?;

    Some(PregnancyInfo {
        lmp_edd: anchor.lmp_edd,
        ultrasound_edd: anchor.ultrasound_edd,
        best_estimate_edd: anchor.best_estimate_edd,
        source: anchor.source,
        estimated_lmp,
        evaluated_on: today,
        gestational_age_weeks,
        gestational_age_days,
        conception_date: anchor.conception_date,
        trimester,
        first_trimester_end,
        second_trimester_end,
        discrepancy_days: anchor.discrepancy_days,
        milestone_dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn anchor(estimated_lmp: NaiveDate) -> DatingAnchor {
        let edd = estimated_lmp + Days::new(280);
        DatingAnchor {
            estimated_lmp,
            conception_date: estimated_lmp + Days::new(14),
            lmp_edd: edd,
            ultrasound_edd: edd,
            best_estimate_edd: edd,
            source: DatingSource::Lmp,
            discrepancy_days: 0,
        }
    }

    #[test]
    fn test_format_single_day() {
        assert_eq!(
            format_date_range(date(2024, 7, 4), date(2024, 7, 4)),
            "Jul 4, 2024"
        );
    }

    #[test]
    fn test_format_range_same_year() {
        assert_eq!(
            format_date_range(date(2024, 3, 11), date(2024, 4, 7)),
            "Mar 11 – Apr 7, 2024"
        );
    }

    #[test]
    fn test_format_range_across_years() {
        assert_eq!(
            format_date_range(date(2024, 12, 20), date(2025, 1, 5)),
            "Dec 20, 2024 – Jan 5, 2025"
        );
    }

    #[test]
    fn test_gestational_age_clamps_future_lmp() {
        assert_eq!(gestational_age_on(date(2024, 1, 1), date(2024, 3, 1)), (0, 0));
        assert_eq!(gestational_age_on(date(2024, 1, 1), date(2024, 1, 1)), (0, 0));
        assert_eq!(gestational_age_on(date(2024, 2, 26), date(2024, 1, 1)), (8, 0));
        assert_eq!(gestational_age_on(date(2024, 2, 29), date(2024, 1, 1)), (8, 3));
    }

    #[test]
    fn test_trimester_boundaries_are_strict() {
        let lmp = date(2024, 1, 1);
        let info = derive_pregnancy_info(anchor(lmp), lmp).unwrap();
        let first_end = info.first_trimester_end;
        let second_end = info.second_trimester_end;
        assert_eq!(first_end, date(2024, 4, 7));
        assert_eq!(second_end, date(2024, 7, 14));

        assert_eq!(trimester_on(first_end, first_end, second_end), 1);
        assert_eq!(
            trimester_on(first_end + Days::new(1), first_end, second_end),
            2
        );
        assert_eq!(trimester_on(second_end, first_end, second_end), 2);
        assert_eq!(
            trimester_on(second_end + Days::new(1), first_end, second_end),
            3
        );
    }

    #[test]
    fn test_milestones_follow_catalog() {
        let lmp = date(2024, 1, 1);
        let info = derive_pregnancy_info(anchor(lmp), date(2024, 5, 1)).unwrap();
        assert_eq!(info.milestone_dates.len(), MILESTONE_CATALOG.len());

        let nt = &info.milestone_dates[1];
        assert_eq!(nt.name, "NT scan window");
        assert_eq!(nt.date_range, "Mar 18 – Apr 7, 2024");

        let rhogam = info
            .milestone_dates
            .iter()
            .find(|m| m.name.starts_with("Rh immunoglobulin"))
            .unwrap();
        assert_eq!(rhogam.date_range, "Jul 15, 2024");

        let full_term = info.milestone_dates.last().unwrap();
        assert_eq!(full_term.date_range, "Sep 30, 2024");
    }

    #[test]
    fn test_derived_fields_are_consistent() {
        let lmp = date(2024, 1, 1);
        let today = date(2024, 5, 1);
        let info = derive_pregnancy_info(anchor(lmp), today).unwrap();
        assert_eq!(
            i64::from(info.total_gestational_days()),
            (today - lmp).num_days()
        );
        assert_eq!(info.trimester, 2);
        assert_eq!(info.evaluated_on, today);
    }

    #[test]
    fn test_out_of_calendar_range_yields_none() {
        let lmp = NaiveDate::MAX - Days::new(10);
        let mut a = anchor(date(2024, 1, 1));
        a.estimated_lmp = lmp;
        assert!(derive_pregnancy_info(a, date(2024, 1, 1)).is_none());
    }
}
