//! Analysis form validation
//!
//! Business-rule checks applied by the dashboard before a request is handed
//! to the job tracker, plus the small arithmetic behind the number fields.

use std::ops::RangeInclusive;

use crate::logic::errors::AnalysisError;
use crate::model::job::{AnalysisRequest, ITERATION_RANGE, TOPIC_RANGE};

/// Build a request from the form, enforcing the dashboard's ranges
///
/// # Examples
/// ```
/// use sdgdash::logic::validation::build_request;
///
/// let request = build_request(Some("doc_1"), 5, 200).unwrap();
/// assert_eq!(request.num_topics, 5);
/// assert!(build_request(None, 5, 200).is_err());
/// assert!(build_request(Some("doc_1"), 26, 200).is_err());
/// ```
pub fn build_request(
    document_id: Option<&str>,
    num_topics: u32,
    max_iterations: u32,
) -> Result<AnalysisRequest, AnalysisError> {
    let document_id = document_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AnalysisError::Validation("Select a document first".to_string()))?;

    check_range("Topic count", num_topics, &TOPIC_RANGE)?;
    check_range("Max iterations", max_iterations, &ITERATION_RANGE)?;

    Ok(AnalysisRequest::new(document_id, num_topics, max_iterations))
}

fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), AnalysisError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AnalysisError::Validation(format!(
            "{} must be between {} and {}",
            field,
            range.start(),
            range.end()
        )))
    }
}

/// Move a number field by `delta`, staying inside `range`
pub fn step_value(current: u32, delta: i64, range: &RangeInclusive<u32>) -> u32 {
    let next = i64::from(current) + delta;
    next.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

/// Append a typed digit to a number field
///
/// Typing past the range maximum starts the field over with the new digit,
/// so the field never holds an out-of-range value.
pub fn push_digit(current: u32, digit: u32, range: &RangeInclusive<u32>) -> u32 {
    let appended = u64::from(current) * 10 + u64::from(digit);
    if appended <= u64::from(*range.end()) {
        appended as u32
    } else {
        digit
    }
}

/// Remove the last digit of a number field
pub fn pop_digit(current: u32) -> u32 {
    current / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_accepts_bounds() {
        assert!(build_request(Some("doc_1"), 1, 1).is_ok());
        assert!(build_request(Some("doc_1"), 25, 1000).is_ok());
    }

    #[test]
    fn test_build_request_rejects_out_of_range() {
        let err = build_request(Some("doc_1"), 0, 200).unwrap_err();
        assert_eq!(err.to_string(), "Topic count must be between 1 and 25");

        let err = build_request(Some("doc_1"), 5, 1001).unwrap_err();
        assert_eq!(err.to_string(), "Max iterations must be between 1 and 1000");
    }

    #[test]
    fn test_build_request_requires_document() {
        assert!(matches!(
            build_request(Some("  "), 5, 200),
            Err(AnalysisError::Validation(_))
        ));
        assert!(build_request(None, 5, 200).is_err());
    }

    #[test]
    fn test_build_request_trims_document_id() {
        let request = build_request(Some(" doc_1 "), 5, 200).unwrap();
        assert_eq!(request.document_id, "doc_1");
    }

    #[test]
    fn test_step_value_clamps() {
        assert_eq!(step_value(25, 1, &TOPIC_RANGE), 25);
        assert_eq!(step_value(1, -1, &TOPIC_RANGE), 1);
        assert_eq!(step_value(200, 50, &ITERATION_RANGE), 250);
        assert_eq!(step_value(990, 50, &ITERATION_RANGE), 1000);
    }

    #[test]
    fn test_push_and_pop_digit() {
        assert_eq!(push_digit(1, 2, &TOPIC_RANGE), 12);
        assert_eq!(push_digit(12, 3, &TOPIC_RANGE), 3);
        assert_eq!(push_digit(100, 0, &ITERATION_RANGE), 1000);
        assert_eq!(pop_digit(123), 12);
        assert_eq!(pop_digit(7), 0);
    }
}
