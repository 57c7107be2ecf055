use crate::domain::model::{DatingMethod, PregnancyInfo};
use crate::utils::error::{DatingError, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

pub const OUTPUT_FORMATS: &[&str] = &["text", "json", "csv", "tsv"];

const DISPLAY_DATE: &str = "%b %-d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Tsv,
}

impl FromStr for OutputFormat {
    type Err = DatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(DatingError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: s.to_string(),
                reason: format!("Valid formats: {}", OUTPUT_FORMATS.join(", ")),
            }),
        }
    }
}

/// One evaluated case of a batch run. `info` is None when inputs were insufficient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseOutcome {
    pub name: String,
    pub method: DatingMethod,
    pub info: Option<PregnancyInfo>,
}

fn display(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE).to_string()
}

const INSUFFICIENT_INPUT: &str = "insufficient input";

/// (section, name, value) 三欄，CSV/TSV 與文字輸出共用
fn report_rows(info: &PregnancyInfo) -> Vec<(&'static str, String, String)> {
    let mut rows = vec![
        ("summary", "source".to_string(), info.source.to_string()),
        ("summary", "bestEstimateEdd".to_string(), info.best_estimate_edd.to_string()),
        ("summary", "lmpEdd".to_string(), info.lmp_edd.to_string()),
        ("summary", "ultrasoundEdd".to_string(), info.ultrasound_edd.to_string()),
        ("summary", "estimatedLmp".to_string(), info.estimated_lmp.to_string()),
        ("summary", "discrepancyDays".to_string(), info.discrepancy_days.to_string()),
        ("summary", "evaluatedOn".to_string(), info.evaluated_on.to_string()),
        (
            "summary",
            "gestationalAgeWeeks".to_string(),
            info.gestational_age_weeks.to_string(),
        ),
        (
            "summary",
            "gestationalAgeDays".to_string(),
            info.gestational_age_days.to_string(),
        ),
        ("summary", "trimester".to_string(), info.trimester.to_string()),
        ("summary", "conceptionDate".to_string(), info.conception_date.to_string()),
        (
            "summary",
            "firstTrimesterEnd".to_string(),
            info.first_trimester_end.to_string(),
        ),
        (
            "summary",
            "secondTrimesterEnd".to_string(),
            info.second_trimester_end.to_string(),
        ),
    ];
    rows.extend(
        info.milestone_dates
            .iter()
            .map(|m| ("milestone", m.name.to_string(), m.date_range.clone())),
    );
    rows
}

pub fn render_text(info: &PregnancyInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dating source:        {} ({})",
        info.source,
        info.source.description()
    );
    let _ = writeln!(out, "Estimated due date:   {}", display(info.best_estimate_edd));
    let _ = writeln!(out, "LMP-based EDD:        {}", display(info.lmp_edd));
    let _ = writeln!(out, "Ultrasound EDD:       {}", display(info.ultrasound_edd));
    let _ = writeln!(out, "Discrepancy:          {} days", info.discrepancy_days);
    let _ = writeln!(
        out,
        "Gestational age:      {} (as of {})",
        info.gestational_age_label(),
        display(info.evaluated_on)
    );
    let _ = writeln!(out, "Trimester:            {}", info.trimester);
    let _ = writeln!(out, "Conception date:      {}", display(info.conception_date));
    let _ = writeln!(
        out,
        "1st trimester ends:   {}",
        display(info.first_trimester_end)
    );
    let _ = writeln!(
        out,
        "2nd trimester ends:   {}",
        display(info.second_trimester_end)
    );
    let _ = writeln!(out, "Days until due:       {}", info.days_until_due());
    let _ = writeln!(out);
    let _ = writeln!(out, "Milestones:");

    let width = info
        .milestone_dates
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0);
    for m in &info.milestone_dates {
        let _ = writeln!(out, "  {:<width$}  {}", m.name, m.date_range, width = width);
    }
    out
}

fn write_delimited(
    delimiter: u8,
    rows: impl Iterator<Item = Vec<String>>,
    header: &[&str],
) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    let data = wtr.into_inner().map_err(|e| DatingError::RenderError {
        message: e.to_string(),
    })?;
    String::from_utf8(data).map_err(|e| DatingError::RenderError {
        message: e.to_string(),
    })
}

fn delimiter_for(format: OutputFormat) -> u8 {
    if format == OutputFormat::Tsv {
        b'\t'
    } else {
        b','
    }
}

pub fn render_report(info: &PregnancyInfo, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(info)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Csv | OutputFormat::Tsv => write_delimited(
            delimiter_for(format),
            report_rows(info)
                .into_iter()
                .map(|(section, name, value)| vec![section.to_string(), name, value]),
            &["section", "name", "value"],
        ),
    }
}

pub fn render_batch(outcomes: &[CaseOutcome], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for outcome in outcomes {
                let _ = writeln!(out, "== {} ({}) ==", outcome.name, outcome.method);
                match &outcome.info {
                    Some(info) => out.push_str(&render_text(info)),
                    None => {
                        let _ = writeln!(out, "Insufficient input, no dating computed");
                    }
                }
                let _ = writeln!(out);
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcomes)?),
        OutputFormat::Csv | OutputFormat::Tsv => {
            let rows = outcomes.iter().flat_map(|outcome| {
                // 無結果的個案仍輸出一列狀態，避免在表格中消失
                let rows = match &outcome.info {
                    Some(info) => report_rows(info),
                    None => vec![(
                        "summary",
                        "status".to_string(),
                        INSUFFICIENT_INPUT.to_string(),
                    )],
                };
                rows.into_iter().map(move |(section, name, value)| {
                    vec![outcome.name.clone(), section.to_string(), name, value]
                })
            });
            write_delimited(
                delimiter_for(format),
                rows,
                &["case", "section", "name", "value"],
            )
        }
    }
}
