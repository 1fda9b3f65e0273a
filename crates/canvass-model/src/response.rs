use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Answer;

/// One respondent's submission to a survey.
///
/// Responses are never modified after they are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    /// Answers keyed by question id. Unanswered questions have no entry.
    #[serde(default)]
    pub answers: BTreeMap<String, Answer>,
}

impl SurveyResponse {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        survey_id: impl Into<String>,
        user_id: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            survey_id: survey_id.into(),
            user_id: user_id.into(),
            submitted_at,
            answers: BTreeMap::new(),
        }
    }

    /// Adds an answer, replacing any previous answer to the same question.
    #[must_use]
    pub fn with_answer(mut self, question_id: impl Into<String>, answer: impl Into<Answer>) -> Self {
        self.answers.insert(question_id.into(), answer.into());
        self
    }

    /// Returns the answer to `question_id`, if present.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_stored_response() {
        let response: SurveyResponse = serde_json::from_value(json!({
            "id": "resp_1717171717",
            "surveyId": "team-pulse",
            "userId": "user-anonymous",
            "submittedAt": "2024-05-31T16:08:37.000Z",
            "answers": {
                "q-score": 4,
                "q-dept": "Sales",
                "q-tools": ["Slack", "Email"]
            }
        }))
        .unwrap();
        assert_eq!(response.survey_id, "team-pulse");
        assert_eq!(response.answer("q-score"), Some(&Answer::Number(4.0)));
        assert_eq!(response.answer("q-dept").and_then(Answer::as_category), Some("Sales"));
        assert_eq!(response.answer("q-missing"), None);
    }

    #[test]
    fn test_missing_answers_default_to_empty() {
        let response: SurveyResponse = serde_json::from_value(json!({
            "id": "r",
            "surveyId": "s",
            "userId": "u",
            "submittedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(response.answers.is_empty());
    }
}
