use crate::app::report::OUTPUT_FORMATS;
use crate::config::settings::Settings;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_optional_date, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ob-dating")]
#[command(about = "Estimate due date, gestational age and prenatal milestones")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Output format: text, json, csv or tsv
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Date from the last menstrual period, optionally with an early ultrasound
    Lmp(LmpArgs),
    /// Work backwards from a known estimated due date
    Edd(EddArgs),
    /// Evaluate every [[cases]] entry of the configuration file
    Batch,
}

#[derive(Debug, Clone, Args)]
pub struct LmpArgs {
    /// First day of the last menstrual period
    #[arg(long)]
    pub lmp: String,

    /// Date of the early ultrasound
    #[arg(long)]
    pub ultrasound_date: Option<String>,

    /// Gestational age at scan, completed weeks
    #[arg(long)]
    pub ga_weeks: Option<u32>,

    /// Gestational age at scan, extra days (0-6)
    #[arg(long)]
    pub ga_days: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct EddArgs {
    /// Established estimated due date
    #[arg(long)]
    pub edd: String,
}

impl CliConfig {
    pub fn load_toml(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_deref()
            .map(|path| {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(config)
            })
            .transpose()
    }

    /// 命令列參數優先於設定檔
    pub fn resolve(&self, toml: Option<&TomlConfig>) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(toml) = toml {
            settings.evaluation_date = toml.evaluation_date();
            settings.scan_week_bounds = toml.scan_week_bounds();
            if let Some(format) = toml.output_format_setting() {
                settings.output_format = format.trim().to_ascii_lowercase();
            }
        }

        if let Some(today) = validate_optional_date("--today", self.today.as_deref())? {
            settings.evaluation_date = Some(today);
        }
        if let Some(format) = &self.format {
            let format = format.trim().to_ascii_lowercase();
            validate_one_of("--format", &format, OUTPUT_FORMATS)?;
            settings.output_format = format;
        }

        Ok(settings)
    }
}
