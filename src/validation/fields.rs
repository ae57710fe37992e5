use crate::core::error::ApiError;
use crate::models::result::MidtermPayload;
use crate::models::subject::Course;

/// Midterm marks are bounded by the paper's 50-mark scale
pub const MAX_MIDTERM_MARKS: f64 = 50.0;

/// Required-field check for payload values; missing maps to a 400
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("{} is required", field)))
}

/// Required string that must also be non-blank after trimming
pub fn required_str(value: Option<String>, field: &str) -> Result<String, ApiError> {
    let value = required(value, field)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Parse a course code from a payload or route parameter
pub fn parse_course(value: &str) -> Result<Course, ApiError> {
    value.parse().map_err(|_| {
        ApiError::Validation(format!(
            "Invalid course '{}'. Must be one of: CSE, IT, CE",
            value
        ))
    })
}

/// Range-check whatever midterm fields were supplied
pub fn check_midterm(payload: &MidtermPayload, which: &str) -> Result<(), ApiError> {
    if let Some(marks) = payload.marks_obtained {
        if !(0.0..=MAX_MIDTERM_MARKS).contains(&marks) {
            return Err(ApiError::Validation(format!(
                "{}.marksObtained must be between 0 and {}",
                which, MAX_MIDTERM_MARKS
            )));
        }
    }
    if let Some(total) = payload.total_marks {
        if total <= 0.0 {
            return Err(ApiError::Validation(format!(
                "{}.totalMarks must be greater than 0",
                which
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_present_and_missing() {
        assert_eq!(required(Some(3u32), "year").unwrap(), 3);
        assert!(required::<u32>(None, "year").is_err());
    }

    #[test]
    fn test_required_str_trims_and_rejects_blank() {
        assert_eq!(
            required_str(Some("  Asha ".to_string()), "name").unwrap(),
            "Asha"
        );
        assert!(required_str(Some("   ".to_string()), "name").is_err());
        assert!(required_str(None, "name").is_err());
    }

    #[test]
    fn test_parse_course_messages() {
        assert_eq!(parse_course("cse").unwrap(), Course::Cse);
        match parse_course("EEE") {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("EEE")),
            other => panic!("Expected validation error, got {:?}", other.ok()),
        }
    }

    #[test]
    fn test_check_midterm_bounds() {
        let ok = MidtermPayload {
            marks_obtained: Some(50.0),
            total_marks: Some(50.0),
        };
        assert!(check_midterm(&ok, "mid1").is_ok());

        let over = MidtermPayload {
            marks_obtained: Some(50.5),
            total_marks: None,
        };
        assert!(check_midterm(&over, "mid1").is_err());

        let negative = MidtermPayload {
            marks_obtained: Some(-1.0),
            total_marks: None,
        };
        assert!(check_midterm(&negative, "mid2").is_err());

        let zero_total = MidtermPayload {
            marks_obtained: None,
            total_marks: Some(0.0),
        };
        assert!(check_midterm(&zero_total, "mid1").is_err());

        // nothing supplied, nothing to check
        assert!(check_midterm(&MidtermPayload::default(), "mid1").is_ok());
    }
}
