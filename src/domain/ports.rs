use chrono::NaiveDate;

/// Source of "today" for gestational age and trimester.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

pub trait ConfigProvider: Send + Sync {
    /// 固定的評估日期，None 表示使用系統時鐘
    fn evaluation_date(&self) -> Option<NaiveDate>;
    fn output_format(&self) -> &str;
    fn scan_week_bounds(&self) -> (u32, u32);
}
