pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FixedClock, SystemClock};
pub use config::{Settings, TomlConfig};
pub use crate::core::engine::{compute_from_edd, compute_from_lmp, DatingEngine};
pub use crate::core::redating::redating_threshold_days;
pub use domain::model::{
    parse_date, DatingMethod, DatingSource, LmpInput, MilestoneDate, PregnancyInfo,
    UltrasoundScan,
};
pub use domain::ports::Clock;
pub use utils::error::{DatingError, Result};
