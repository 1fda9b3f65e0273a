use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Question, SurveyResponse};

/// A survey definition with its questions in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Survey {
    /// Looks up a question by id.
    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Returns the responses submitted to this survey.
    ///
    /// A survey's result set is every response referencing its id; responses
    /// to other surveys are skipped.
    pub fn responses_in<'a>(
        &'a self,
        responses: &'a [SurveyResponse],
    ) -> impl Iterator<Item = &'a SurveyResponse> + 'a {
        responses.iter().filter(move |r| r.survey_id == self.id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;
    use crate::QuestionType;

    fn survey() -> Survey {
        Survey {
            id: "pulse".into(),
            title: "Team pulse".into(),
            description: String::new(),
            questions: vec![
                Question::new("q1", "Happy?", QuestionType::YesNo),
                Question::new("q2", "Score", QuestionType::Rating).with_bounds(1.0, 5.0),
            ],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_question_lookup() {
        let survey = survey();
        assert_eq!(survey.question("q2").map(|q| q.question_type), Some(QuestionType::Rating));
        assert!(survey.question("q3").is_none());
    }

    #[test]
    fn test_responses_in_filters_by_survey_id() {
        let survey = survey();
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let responses = vec![
            SurveyResponse::new("r1", "pulse", "u1", at),
            SurveyResponse::new("r2", "other", "u2", at),
            SurveyResponse::new("r3", "pulse", "u3", at),
        ];
        let ids = survey
            .responses_in(&responses)
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["r1", "r3"]);
    }
}
