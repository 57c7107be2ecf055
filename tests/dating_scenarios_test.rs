use chrono::{Days, NaiveDate};
use ob_dating::{
    compute_from_edd, compute_from_lmp, DatingEngine, DatingSource, FixedClock, LmpInput,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engine_on(today: NaiveDate) -> DatingEngine<FixedClock> {
    DatingEngine::new(FixedClock::new(today))
}

/// LMP 2024-01-01，無超音波
#[test]
fn test_lmp_only_scenario() {
    let info = engine_on(date(2024, 3, 1))
        .compute_from_lmp(&LmpInput::lmp_only(date(2024, 1, 1)))
        .unwrap();

    assert_eq!(info.lmp_edd, date(2024, 10, 7));
    assert_eq!(info.best_estimate_edd, date(2024, 10, 7));
    assert_eq!(info.source, DatingSource::Lmp);
    assert_eq!(info.discrepancy_days, 0);
}

#[test]
fn test_ultrasound_redates_beyond_threshold() {
    let input = LmpInput::with_ultrasound(date(2024, 1, 1), date(2024, 2, 26), 9, 0);
    let info = engine_on(date(2024, 3, 1)).compute_from_lmp(&input).unwrap();

    assert_eq!(info.discrepancy_days, 7);
    assert_eq!(info.source, DatingSource::Ultrasound);
    assert_eq!(info.best_estimate_edd, info.ultrasound_edd);
    assert_eq!(info.lmp_edd, date(2024, 10, 7));
}

#[test]
fn test_ultrasound_confirms_within_threshold() {
    let input = LmpInput::with_ultrasound(date(2024, 1, 1), date(2024, 2, 26), 8, 2);
    let info = engine_on(date(2024, 3, 1)).compute_from_lmp(&input).unwrap();

    assert_eq!(info.discrepancy_days, 2);
    assert_eq!(info.source, DatingSource::LmpConfirmed);
    assert_eq!(info.best_estimate_edd, info.lmp_edd);
    assert_eq!(info.ultrasound_edd, date(2024, 10, 5));
}

#[test]
fn test_known_edd_works_backwards() {
    let edd = date(2025, 6, 15);
    let info = engine_on(date(2025, 1, 1))
        .compute_from_edd(Some(edd))
        .unwrap();

    assert_eq!(info.best_estimate_edd, edd);
    assert_eq!(info.estimated_lmp, edd - Days::new(280));
    assert_eq!(info.conception_date, edd - Days::new(266));
    assert_eq!(info.source, DatingSource::Ultrasound);
    assert_eq!(info.discrepancy_days, 0);
}

#[test]
fn test_lmp_only_properties_hold_across_dates() {
    let today = date(2024, 6, 1);
    let mut lmp = date(2023, 1, 1);
    while lmp < date(2025, 1, 1) {
        let info = compute_from_lmp(&LmpInput::lmp_only(lmp), today).unwrap();
        assert_eq!(info.best_estimate_edd, lmp + Days::new(280));
        assert_eq!(info.source, DatingSource::Lmp);
        assert_eq!(info.discrepancy_days, 0);

        let expected_age = (today - lmp).num_days().max(0);
        assert_eq!(i64::from(info.total_gestational_days()), expected_age);
        assert!(info.gestational_age_days < 7);
        lmp = lmp + Days::new(17);
    }
}

#[test]
fn test_edd_and_lmp_paths_agree() {
    let today = date(2024, 6, 1);
    let lmp = date(2024, 1, 1);
    let forward = compute_from_lmp(&LmpInput::lmp_only(lmp), today).unwrap();
    let reverse = compute_from_edd(Some(forward.best_estimate_edd), today).unwrap();

    assert_eq!(reverse.estimated_lmp, forward.estimated_lmp);
    assert_eq!(reverse.conception_date, forward.conception_date);
    assert_eq!(reverse.first_trimester_end, forward.first_trimester_end);
    assert_eq!(reverse.second_trimester_end, forward.second_trimester_end);
    assert_eq!(reverse.trimester, forward.trimester);
    assert_eq!(reverse.milestone_dates, forward.milestone_dates);
}

#[test]
fn test_never_redates_below_five_weeks() {
    let lmp = date(2024, 1, 1);
    // 4 週 6 天的掃描，量測值無論多大都不改期
    let scan_date = lmp + Days::new(34);
    for weeks in 4..=14 {
        for days in 0..=6 {
            let input = LmpInput::with_ultrasound(lmp, scan_date, weeks, days);
            let info = compute_from_lmp(&input, date(2024, 3, 1)).unwrap();
            assert_ne!(info.source, DatingSource::Ultrasound);
        }
    }
}

#[test]
fn test_redating_flips_once_per_band() {
    let lmp = date(2024, 1, 1);
    // LMP 推算 12 週 0 天，門檻 7 天
    let scan_date = lmp + Days::new(84);
    let mut seen_redate = false;
    for measured in 84..=100u32 {
        let input = LmpInput::with_ultrasound(lmp, scan_date, measured / 7, measured % 7);
        let info = compute_from_lmp(&input, date(2024, 4, 1)).unwrap();
        let redated = info.source == DatingSource::Ultrasound;
        if seen_redate {
            assert!(redated, "reverted to LMP at {} days", measured);
        }
        assert_eq!(redated, info.discrepancy_days > 7);
        seen_redate |= redated;
    }
    assert!(seen_redate);
}

#[test]
fn test_trimester_boundaries() {
    let lmp = date(2024, 1, 1);
    let input = LmpInput::lmp_only(lmp);
    let at_lmp = compute_from_lmp(&input, lmp).unwrap();
    let first_end = at_lmp.first_trimester_end;
    let second_end = at_lmp.second_trimester_end;

    let on = |today: NaiveDate| compute_from_lmp(&input, today).unwrap().trimester;
    assert_eq!(on(first_end), 1);
    assert_eq!(on(first_end + Days::new(1)), 2);
    assert_eq!(on(second_end), 2);
    assert_eq!(on(second_end + Days::new(1)), 3);
}

#[test]
fn test_future_lmp_clamps_age_to_zero() {
    let info = compute_from_lmp(&LmpInput::lmp_only(date(2024, 8, 1)), date(2024, 6, 1)).unwrap();
    assert_eq!(info.gestational_age_weeks, 0);
    assert_eq!(info.gestational_age_days, 0);
    assert_eq!(info.trimester, 1);
}

#[test]
fn test_single_day_milestones_collapse() {
    let info = compute_from_lmp(&LmpInput::lmp_only(date(2024, 1, 1)), date(2024, 6, 1)).unwrap();
    let full_term = info
        .milestone_dates
        .iter()
        .find(|m| m.name == "Full term")
        .unwrap();
    assert_eq!(full_term.date_range, "Sep 30, 2024");
    assert!(!full_term.date_range.contains('–'));

    let anatomy = info
        .milestone_dates
        .iter()
        .find(|m| m.name == "Anatomy scan")
        .unwrap();
    assert_eq!(anatomy.date_range, "May 6 – Jun 9, 2024");
}

#[test]
fn test_raw_form_input_is_lenient() {
    let today = date(2024, 3, 1);
    let bad_lmp = LmpInput::parse(Some("not a date"), None, None, None);
    assert!(compute_from_lmp(&bad_lmp, today).is_none());

    let bad_scan = LmpInput::parse(Some("2024-01-01"), Some("2024-02-31"), Some("9"), Some("0"));
    let info = compute_from_lmp(&bad_scan, today).unwrap();
    assert_eq!(info.source, DatingSource::Lmp);

    assert!(compute_from_edd(None, today).is_none());
}
