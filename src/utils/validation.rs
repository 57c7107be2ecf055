use crate::domain::model::parse_date;
use crate::utils::error::{DatingError, Result};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 嚴格版本的日期解析：給 CLI / 設定檔用，失敗時回報錯誤
pub fn validate_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| DatingError::InvalidDateError {
        field: field_name.to_string(),
        value: value.to_string(),
    })
}

pub fn validate_optional_date(field_name: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(|v| validate_date(field_name, v)).transpose()
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DatingError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DatingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(DatingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range(field_name: &str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(DatingError::OutOfRangeError {
            field: field_name.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
