use serde::Serialize;

use crate::AnalysisError;

/// The success/failure document returned to the results screen.
///
/// Serialized as `{"success": true, "result": ...}` or
/// `{"success": false, "error": "..."}`. A report never carries both a
/// result and an error.
///
/// # Examples
///
/// ```
/// # use canvass_analysis::{AnalysisError, report::StatReport};
/// let report = StatReport::<f64>::from(Err(AnalysisError::NoNumericalData {
///     question_id: "q1".into(),
/// }));
/// assert_eq!(
///     serde_json::to_string(&report).unwrap(),
///     r#"{"success":false,"error":"No valid numerical data found for question 'q1'"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatReport<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> StatReport<T> {
    #[must_use]
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: &AnalysisError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T> From<Result<T, AnalysisError>> for StatReport<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(&error),
        }
    }
}
