/// Offset from the estimated LMP, in completed weeks plus days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestationalOffset {
    pub weeks: u32,
    pub days: u32,
}

impl GestationalOffset {
    pub const fn new(weeks: u32, days: u32) -> Self {
        Self { weeks, days }
    }

    pub const fn total_days(&self) -> u64 {
        self.weeks as u64 * 7 + self.days as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub name: &'static str,
    pub start: GestationalOffset,
    pub end: GestationalOffset,
}

const fn milestone(
    name: &'static str,
    start: (u32, u32),
    end: (u32, u32),
) -> Milestone {
    Milestone {
        name,
        start: GestationalOffset::new(start.0, start.1),
        end: GestationalOffset::new(end.0, end.1),
    }
}

pub const FIRST_TRIMESTER_END: GestationalOffset = GestationalOffset::new(13, 6);
pub const SECOND_TRIMESTER_END: GestationalOffset = GestationalOffset::new(27, 6);

/// 固定的產檢里程碑，順序即輸出順序
pub static MILESTONE_CATALOG: &[Milestone] = &[
    milestone("First trimester blood screening", (10, 0), (13, 6)),
    milestone("NT scan window", (11, 0), (13, 6)),
    milestone("Quad screen", (15, 0), (22, 6)),
    milestone("Anatomy scan", (18, 0), (22, 6)),
    milestone("Glucose screening", (24, 0), (28, 0)),
    milestone("Rh immunoglobulin (if Rh-negative)", (28, 0), (28, 0)),
    milestone("Tdap vaccine window", (27, 0), (36, 6)),
    milestone("GBS screening", (36, 0), (37, 6)),
    milestone("Full term", (39, 0), (39, 0)),
];
