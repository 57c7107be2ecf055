use anyhow::Context;
use clap::Parser;
use std::io::Write;
use ob_dating::adapters::clock::ConfiguredClock;
use ob_dating::app::batch::run_cases;
use ob_dating::app::input::{edd_from_raw, lmp_input_from_raw, RawLmpFields};
use ob_dating::app::report::{render_batch, render_report};
use ob_dating::config::{CliConfig, Command};
use ob_dating::utils::error::ErrorSeverity;
use ob_dating::utils::logger;
use ob_dating::utils::validation::validate_required_field;
use ob_dating::{DatingEngine, DatingError, TomlConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("writing report to stdout")?;
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Dating failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> ob_dating::Result<String> {
    let toml = config.load_toml()?;
    let settings = config.resolve(toml.as_ref())?;
    let format = settings.format()?;

    let clock = ConfiguredClock::from_evaluation_date(settings.evaluation_date);
    let engine = DatingEngine::new(clock);

    match &config.command {
        Command::Lmp(args) => {
            let raw = RawLmpFields {
                lmp: &args.lmp,
                ultrasound_date: args.ultrasound_date.as_deref(),
                ga_weeks: args.ga_weeks,
                ga_days: args.ga_days,
            };
            let input = lmp_input_from_raw(&raw, settings.scan_week_bounds)?;
            let info = engine
                .compute_from_lmp(&input)
                .ok_or_else(|| insufficient("LMP"))?;
            tracing::info!("✅ Dated by {}: EDD {}", info.source, info.best_estimate_edd);
            render_report(&info, format)
        }
        Command::Edd(args) => {
            let edd = edd_from_raw(&args.edd)?;
            let info = engine
                .compute_from_edd(Some(edd))
                .ok_or_else(|| insufficient("EDD"))?;
            tracing::info!("✅ Worked back from EDD {}", info.best_estimate_edd);
            render_report(&info, format)
        }
        Command::Batch => {
            let toml: &TomlConfig = validate_required_field("--config", &toml)?;
            let outcomes = run_cases(&engine, &toml.cases, settings.scan_week_bounds)?;
            render_batch(&outcomes, format)
        }
    }
}

fn insufficient(method: &str) -> DatingError {
    DatingError::InsufficientInputError {
        method: method.to_string(),
    }
}
