use crate::app::input::{edd_from_raw, lmp_input_from_raw};
use crate::app::report::CaseOutcome;
use crate::config::toml_config::CaseConfig;
use crate::core::engine::DatingEngine;
use crate::domain::model::{DatingMethod, LmpInput};
use crate::domain::ports::Clock;
use crate::utils::error::Result;

pub fn evaluate_case<C: Clock>(
    engine: &DatingEngine<C>,
    case: &CaseConfig,
    scan_week_bounds: (u32, u32),
) -> Result<CaseOutcome> {
    let info = match case.method {
        DatingMethod::Lmp => {
            let input = match case.raw_lmp_fields() {
                Some(raw) => lmp_input_from_raw(&raw, scan_week_bounds)?,
                None => LmpInput::default(),
            };
            engine.compute_from_lmp(&input)
        }
        DatingMethod::Edd => {
            let edd = case.edd.as_deref().map(edd_from_raw).transpose()?;
            engine.compute_from_edd(edd)
        }
    };

    match &info {
        Some(info) => tracing::info!(
            "📅 {}: EDD {} ({}), GA {}",
            case.name,
            info.best_estimate_edd,
            info.source,
            info.gestational_age_label()
        ),
        None => tracing::warn!("⚠️ {}: insufficient input, skipped", case.name),
    }

    Ok(CaseOutcome {
        name: case.name.clone(),
        method: case.method,
        info,
    })
}

pub fn run_cases<C: Clock>(
    engine: &DatingEngine<C>,
    cases: &[CaseConfig],
    scan_week_bounds: (u32, u32),
) -> Result<Vec<CaseOutcome>> {
    tracing::info!("Evaluating {} dating cases", cases.len());
    cases
        .iter()
        .map(|case| evaluate_case(engine, case, scan_week_bounds))
        .collect()
}
