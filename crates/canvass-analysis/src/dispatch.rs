//! Single entry point for running a statistical test by request

use canvass_model::{Question, Survey, SurveyResponse};
use serde::{Deserialize, Serialize};

use crate::{
    AnalysisError,
    association::{AssociationResult, test_association},
    catalogue::StatTest,
    descriptive::{DescriptiveSummary, describe_question},
};

/// A statistical test to run, naming its questions by id.
///
/// Deserialized from `{"testType": "descriptive", "questionId": ...}` or
/// `{"testType": "chi-square", "question1": ..., "question2": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "testType", rename_all = "kebab-case")]
pub enum StatTestRequest {
    #[serde(rename_all = "camelCase")]
    Descriptive { question_id: String },
    ChiSquare { question1: String, question2: String },
}

impl StatTestRequest {
    #[must_use]
    pub fn test(&self) -> StatTest {
        match self {
            Self::Descriptive { .. } => StatTest::Descriptive,
            Self::ChiSquare { .. } => StatTest::ChiSquare,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatTestOutcome {
    Descriptive(DescriptiveSummary),
    ChiSquare(AssociationResult),
}

/// Runs `request` over the responses submitted to `survey`.
///
/// Responses referencing another survey are ignored.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownQuestion`] if a requested question is not
/// part of the survey, or the error of the requested test.
pub fn run_statistical_test(
    survey: &Survey,
    responses: &[SurveyResponse],
    request: &StatTestRequest,
) -> Result<StatTestOutcome, AnalysisError> {
    tracing::debug!(survey_id = %survey.id, test = %request.test(), "running statistical test");
    match request {
        StatTestRequest::Descriptive { question_id } => {
            let question = lookup(survey, question_id)?;
            describe_question(survey.responses_in(responses), &question.id)
                .map(StatTestOutcome::Descriptive)
        }
        StatTestRequest::ChiSquare {
            question1,
            question2,
        } => {
            let question1 = lookup(survey, question1)?;
            let question2 = lookup(survey, question2)?;
            test_association(survey.responses_in(responses), question1, question2)
                .map(StatTestOutcome::ChiSquare)
        }
    }
}

fn lookup<'a>(survey: &'a Survey, question_id: &str) -> Result<&'a Question, AnalysisError> {
    survey
        .question(question_id)
        .ok_or_else(|| AnalysisError::UnknownQuestion {
            question_id: question_id.to_owned(),
            survey_id: survey.id.clone(),
        })
}
