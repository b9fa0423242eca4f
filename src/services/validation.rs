//! Input checks applied before anything reaches the database.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::errors::{AppError, AppResult};
use crate::models::AppointmentStatus;

pub fn require_name(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text is stored as NULL.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Upper bound for a single charge. Keeps dashboard sums finite.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

pub fn require_amount(amount: f64) -> AppResult<f64> {
    if !amount.is_finite() {
        return Err(AppError::Validation("amount must be a finite number".to_string()));
    }
    if amount < 0.0 {
        return Err(AppError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::Validation(format!(
            "amount must not exceed {MAX_AMOUNT}, got {amount}"
        )));
    }
    Ok(amount)
}

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

/// Accepts `HH:MM` or `HH:MM:SS`; seconds are dropped.
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("invalid time '{value}', expected HH:MM")))?;
    time.with_second(0)
        .ok_or_else(|| AppError::Validation(format!("invalid time '{value}'")))
}

pub fn parse_status(value: &str) -> AppResult<AppointmentStatus> {
    AppointmentStatus::parse(value.trim()).ok_or_else(|| {
        AppError::Validation(format!(
            "unknown status '{value}', expected scheduled, completed or cancelled"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_name_trims() {
        assert_eq!(require_name("name", "  Rupa ").unwrap(), "Rupa");
        assert!(matches!(
            require_name("name", "   "),
            Err(AppError::Validation(_))
        ));
        assert!(require_name("name", "").is_err());
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(
            optional_text(Some(" a@b.in ".to_string())),
            Some("a@b.in".to_string())
        );
    }

    #[test]
    fn test_require_amount() {
        assert_eq!(require_amount(0.0).unwrap(), 0.0);
        assert_eq!(require_amount(499.5).unwrap(), 499.5);
        assert!(require_amount(-0.01).is_err());
        assert!(require_amount(f64::NAN).is_err());
        assert!(require_amount(f64::INFINITY).is_err());
        assert_eq!(require_amount(MAX_AMOUNT).unwrap(), MAX_AMOUNT);
        assert!(require_amount(MAX_AMOUNT + 1.0).is_err());
        assert!(require_amount(f64::MAX).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("28/02/2025").is_err());
    }

    #[test]
    fn test_parse_time_accepts_seconds() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_time("14:30").unwrap(), expected);
        assert_eq!(parse_time("14:30:45").unwrap(), expected);
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("2pm").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("completed").unwrap(), AppointmentStatus::Completed);
        assert!(matches!(parse_status("done"), Err(AppError::Validation(_))));
    }
}
