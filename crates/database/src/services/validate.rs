use crate::error::ServiceError;
use chrono::NaiveDate;

pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(field, "is required"));
    }
    Ok(())
}

pub(crate) fn email(field: &'static str, value: Option<&str>) -> Result<(), ServiceError> {
    match value.map(str::trim) {
        Some(address) if !address.is_empty() => {
            let (local, domain) = address
                .split_once('@')
                .ok_or_else(|| ServiceError::validation(field, "must contain '@'"))?;
            if local.is_empty() || domain.is_empty() || address.contains(char::is_whitespace) {
                return Err(ServiceError::validation(field, "is not an email address"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub(crate) fn not_negative(field: &'static str, value: Option<i32>) -> Result<(), ServiceError> {
    match value {
        Some(v) if v < 0 => Err(ServiceError::validation(field, "must not be negative")),
        _ => Ok(()),
    }
}

/// `passing` may not exceed `total` when both are known
pub(crate) fn marks(total: Option<i32>, passing: Option<i32>) -> Result<(), ServiceError> {
    not_negative("total_marks", total)?;
    not_negative("passing_marks", passing)?;
    if let (Some(total), Some(passing)) = (total, passing)
        && passing > total
    {
        return Err(ServiceError::validation(
            "passing_marks",
            format!("{passing} exceeds total marks {total}"),
        ));
    }
    Ok(())
}

pub(crate) fn date_order(
    field: &'static str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ServiceError> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(ServiceError::validation(
            field,
            format!("{end} is before {start}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("name", "Grade 5").is_ok());
        assert!(required("name", "   ").is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(email("email", None).is_ok());
        assert!(email("email", Some("")).is_ok());
        assert!(email("email", Some("head@school.ug")).is_ok());
        assert!(email("email", Some("head.school.ug")).is_err());
        assert!(email("email", Some("@school.ug")).is_err());
        assert!(email("email", Some("head @school.ug")).is_err());
    }

    #[test]
    fn test_marks_bounds() {
        assert!(marks(Some(100), Some(40)).is_ok());
        assert!(marks(None, Some(40)).is_ok());
        assert!(marks(Some(100), Some(101)).is_err());
        assert!(marks(Some(-1), None).is_err());
    }

    #[test]
    fn test_date_order() {
        assert!(date_order("end_date", date(2025, 1, 6), date(2025, 4, 4)).is_ok());
        assert!(date_order("end_date", date(2025, 1, 6), date(2025, 1, 6)).is_ok());
        assert!(date_order("end_date", date(2025, 4, 4), date(2025, 1, 6)).is_err());
        assert!(date_order("end_date", None, date(2025, 1, 6)).is_ok());
    }
}
