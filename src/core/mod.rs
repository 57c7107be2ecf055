pub mod derive;
pub mod engine;
pub mod milestones;
pub mod redating;

pub use crate::domain::model::{DatingSource, LmpInput, MilestoneDate, PregnancyInfo};
pub use crate::domain::ports::{Clock, ConfigProvider};
pub use crate::utils::error::Result;
