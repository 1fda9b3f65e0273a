//! Descriptive statistics over the numeric answers to one question
//!
//! Answers are projected with
//! [`Answer::as_number`](canvass_model::Answer::as_number): numbers and
//! numeric text are used, everything else (missing answers, `null`, booleans,
//! lists, non-numeric text) is skipped without error.

use canvass_model::SurveyResponse;
use canvass_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::AnalysisError;

/// Descriptive statistics of one question's numeric answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveSummary {
    pub question_id: String,
    #[serde(flatten)]
    pub stats: DescriptiveStats,
    /// Answers that were present but had no numeric value.
    pub excluded: usize,
}

/// Computes mean, median, mode and range of the numeric answers to `question_id`.
///
/// # Errors
///
/// Returns [`AnalysisError::NoNumericalData`] if no response has a numeric
/// answer to the question.
///
/// # Examples
///
/// ```
/// # use canvass_analysis::descriptive::describe_question;
/// # use canvass_model::SurveyResponse;
/// # use canvass_stats::descriptive::Mode;
/// # use chrono::Utc;
/// let responses = [4.0, 5.0, 5.0]
///     .map(|v| SurveyResponse::new("r", "s", "u", Utc::now()).with_answer("q1", v));
/// let summary = describe_question(&responses, "q1").unwrap();
/// assert_eq!(summary.stats.mode, Mode::Single(5.0));
/// assert!(describe_question(&responses, "q2").is_err());
/// ```
pub fn describe_question<'a, I>(
    responses: I,
    question_id: &str,
) -> Result<DescriptiveSummary, AnalysisError>
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut values = vec![];
    let mut excluded = 0;
    for answer in responses
        .into_iter()
        .filter_map(|response| response.answer(question_id))
    {
        match answer.as_number() {
            Some(value) if !value.is_nan() => values.push(value),
            _ => excluded += 1,
        }
    }
    tracing::debug!(
        question_id,
        used = values.len(),
        excluded,
        "collected numeric answers"
    );

    let stats = DescriptiveStats::new(values).ok_or_else(|| AnalysisError::NoNumericalData {
        question_id: question_id.to_owned(),
    })?;
    Ok(DescriptiveSummary {
        question_id: question_id.to_owned(),
        stats,
        excluded,
    })
}
