use crate::core::derive::{derive_pregnancy_info, DatingAnchor};
use crate::core::redating::{self, PREGNANCY_LENGTH_DAYS};
use crate::domain::model::{DatingSource, LmpInput, PregnancyInfo};
use crate::domain::ports::Clock;
use chrono::{Days, NaiveDate};

/// 受孕日：LMP 後 14 天 (= EDD 前 266 天)
pub const CONCEPTION_OFFSET_DAYS: u64 = 14;
pub const EDD_TO_CONCEPTION_DAYS: u64 = PREGNANCY_LENGTH_DAYS - CONCEPTION_OFFSET_DAYS;

/// Forward method: LMP, optionally reconciled against an early ultrasound.
pub fn compute_from_lmp(input: &LmpInput, today: NaiveDate) -> Option<PregnancyInfo> {
    let lmp_date = input.lmp_date?;
    let lmp_edd = lmp_date.checked_add_days(Days::new(PREGNANCY_LENGTH_DAYS))?;

    let anchor = match input.ultrasound() {
        Some(scan) => {
            let decision = redating::decide(lmp_date, &scan)?;
            let (best_estimate_edd, estimated_lmp) = if decision.redated() {
                let edd = decision.ultrasound_edd;
                (edd, edd.checked_sub_days(Days::new(PREGNANCY_LENGTH_DAYS))?)
            } else {
                (lmp_edd, lmp_date)
            };
            DatingAnchor {
                estimated_lmp,
                conception_date: estimated_lmp
                    .checked_add_days(Days::new(CONCEPTION_OFFSET_DAYS))?,
                lmp_edd,
                ultrasound_edd: decision.ultrasound_edd,
                best_estimate_edd,
                source: decision.source,
                discrepancy_days: decision.discrepancy_days,
            }
        }
        None => DatingAnchor {
            estimated_lmp: lmp_date,
            conception_date: lmp_date.checked_add_days(Days::new(CONCEPTION_OFFSET_DAYS))?,
            lmp_edd,
            ultrasound_edd: lmp_edd,
            best_estimate_edd: lmp_edd,
            source: DatingSource::Lmp,
            discrepancy_days: 0,
        },
    };

    tracing::debug!(
        source = %anchor.source,
        estimated_lmp = %anchor.estimated_lmp,
        best_estimate_edd = %anchor.best_estimate_edd,
        "dated from LMP"
    );

    derive_pregnancy_info(anchor, today)
}

/// Reverse method: a known EDD worked backwards.
pub fn compute_from_edd(edd_known: Option<NaiveDate>, today: NaiveDate) -> Option<PregnancyInfo> {
    let edd = edd_known?;
    let estimated_lmp = edd.checked_sub_days(Days::new(PREGNANCY_LENGTH_DAYS))?;
    let conception_date = edd.checked_sub_days(Days::new(EDD_TO_CONCEPTION_DAYS))?;

    tracing::debug!(edd = %edd, estimated_lmp = %estimated_lmp, "dated from known EDD");

    derive_pregnancy_info(
        DatingAnchor {
            estimated_lmp,
            conception_date,
            lmp_edd: edd,
            ultrasound_edd: edd,
            best_estimate_edd: edd,
            source: DatingSource::Ultrasound,
            discrepancy_days: 0,
        },
        today,
    )
}

/// Dating engine bound to a clock. Holds no state between calls.
pub struct DatingEngine<C: Clock> {
    clock: C,
}

impl<C: Clock> DatingEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn compute_from_lmp(&self, input: &LmpInput) -> Option<PregnancyInfo> {
        compute_from_lmp(input, self.clock.today())
    }

    pub fn compute_from_edd(&self, edd_known: Option<NaiveDate>) -> Option<PregnancyInfo> {
        compute_from_edd(edd_known, self.clock.today())
    }
}
