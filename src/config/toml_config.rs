use crate::app::input::{
    edd_from_raw, lmp_input_from_raw, RawLmpFields, DEFAULT_MAX_SCAN_WEEKS,
    DEFAULT_MIN_SCAN_WEEKS,
};
use crate::app::report::OUTPUT_FORMATS;
use crate::core::ConfigProvider;
use crate::domain::model::{parse_date, DatingMethod};
use crate::utils::error::{DatingError, Result};
use crate::utils::validation::{
    validate_date, validate_non_empty_string, validate_one_of, validate_range, Validate,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// 超音波週數上限的合理範圍
const MAX_CONFIGURABLE_SCAN_WEEKS: u32 = 45;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub evaluation: Option<EvaluationConfig>,
    pub output: Option<OutputConfig>,
    pub input_bounds: Option<InputBoundsConfig>,
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub today: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputBoundsConfig {
    pub min_scan_weeks: Option<u32>,
    pub max_scan_weeks: Option<u32>,
}

/// 批次計算的單一個案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub name: String,
    pub method: DatingMethod,
    pub lmp: Option<String>,
    pub ultrasound_date: Option<String>,
    pub ga_weeks: Option<u32>,
    pub ga_days: Option<u32>,
    pub edd: Option<String>,
}

impl CaseConfig {
    pub fn raw_lmp_fields(&self) -> Option<RawLmpFields<'_>> {
        self.lmp.as_deref().map(|lmp| RawLmpFields {
            lmp,
            ultrasound_date: self.ultrasound_date.as_deref(),
            ga_weeks: self.ga_weeks,
            ga_days: self.ga_days,
        })
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DatingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DatingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EVALUATION_DATE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(today) = self.evaluation.as_ref().and_then(|e| e.today.as_deref()) {
            validate_date("evaluation.today", today)?;
        }

        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validate_one_of(
                "output.format",
                &format.trim().to_ascii_lowercase(),
                OUTPUT_FORMATS,
            )?;
        }

        let (min_weeks, max_weeks) = self.scan_week_bounds();
        validate_range(
            "input_bounds.max_scan_weeks",
            i64::from(max_weeks),
            0,
            i64::from(MAX_CONFIGURABLE_SCAN_WEEKS),
        )?;
        if min_weeks > max_weeks {
            return Err(DatingError::InvalidConfigValueError {
                field: "input_bounds.min_scan_weeks".to_string(),
                value: min_weeks.to_string(),
                reason: format!("Must not exceed max_scan_weeks ({})", max_weeks),
            });
        }

        let mut seen = HashSet::new();
        for case in &self.cases {
            validate_non_empty_string("cases.name", &case.name)?;
            if !seen.insert(case.name.as_str()) {
                return Err(DatingError::InvalidConfigValueError {
                    field: "cases.name".to_string(),
                    value: case.name.clone(),
                    reason: "Case names must be unique".to_string(),
                });
            }
            // 缺少主要日期時不報錯，批次輸出會標示為資料不足
            match case.method {
                DatingMethod::Lmp => {
                    if let Some(raw) = case.raw_lmp_fields() {
                        lmp_input_from_raw(&raw, (min_weeks, max_weeks))?;
                    }
                }
                DatingMethod::Edd => {
                    if let Some(edd) = case.edd.as_deref() {
                        edd_from_raw(edd)?;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn output_format_setting(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn evaluation_date(&self) -> Option<NaiveDate> {
        self.evaluation
            .as_ref()
            .and_then(|e| e.today.as_deref())
            .and_then(parse_date)
    }

    fn output_format(&self) -> &str {
        self.output_format_setting().unwrap_or("text")
    }

    fn scan_week_bounds(&self) -> (u32, u32) {
        let bounds = self.input_bounds.clone().unwrap_or_default();
        (
            bounds.min_scan_weeks.unwrap_or(DEFAULT_MIN_SCAN_WEEKS),
            bounds.max_scan_weeks.unwrap_or(DEFAULT_MAX_SCAN_WEEKS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
