use crate::domain::ports::Clock;
use chrono::{Local, NaiveDate};

/// 以本地時區的日曆日為「今天」
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Clock chosen from configuration: a pinned evaluation date, else the system clock.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl ConfiguredClock {
    pub fn from_evaluation_date(date: Option<NaiveDate>) -> Self {
        match date {
            Some(d) => ConfiguredClock::Fixed(FixedClock::new(d)),
            None => ConfiguredClock::System(SystemClock),
        }
    }
}

impl Clock for ConfiguredClock {
    fn today(&self) -> NaiveDate {
        match self {
            ConfiguredClock::System(c) => c.today(),
            ConfiguredClock::Fixed(c) => c.today(),
        }
    }
}
