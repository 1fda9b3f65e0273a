//! Per-question overview of a survey's results

use canvass_model::{Answer, QuestionType, Survey, SurveyResponse};
use serde::Serialize;

use crate::{
    catalogue::{StatTest, applicable_tests, chi_square_partners},
    distribution::AnswerDistribution,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub survey_id: String,
    pub title: String,
    pub response_count: usize,
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub question_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Responses with a non-null answer to this question.
    pub answered: usize,
    pub applicable_tests: Vec<StatTest>,
    /// Ids of the questions this one can be paired with in a Chi-Square test.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chi_square_partners: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<AnswerDistribution>,
}

impl SurveySummary {
    /// Summarizes every question of `survey` over the responses submitted to it.
    #[must_use]
    pub fn new(survey: &Survey, responses: &[SurveyResponse]) -> Self {
        let responses = survey.responses_in(responses).collect::<Vec<_>>();
        let questions = survey
            .questions
            .iter()
            .map(|question| QuestionSummary {
                question_id: question.id.clone(),
                text: question.text.clone(),
                question_type: question.question_type,
                answered: responses
                    .iter()
                    .filter(|r| r.answer(&question.id).is_some_and(|a| *a != Answer::Null))
                    .count(),
                applicable_tests: applicable_tests(question).to_vec(),
                chi_square_partners: if question.is_categorical() {
                    chi_square_partners(survey, question)
                        .map(|partner| partner.id.clone())
                        .collect()
                } else {
                    vec![]
                },
                distribution: AnswerDistribution::for_question(
                    question,
                    responses.iter().copied(),
                ),
            })
            .collect();
        tracing::debug!(survey_id = %survey.id, responses = responses.len(), "summarized survey");
        Self {
            survey_id: survey.id.clone(),
            title: survey.title.clone(),
            response_count: responses.len(),
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use canvass_model::Question;
    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::{distribution::AnswerCount, test_util::response};

    fn survey() -> Survey {
        Survey {
            id: "s".into(),
            title: "Lunch".into(),
            description: String::new(),
            questions: vec![
                Question::new("dish", "Favourite dish", QuestionType::Dropdown)
                    .with_options(["Soup", "Salad"]),
                Question::new("price", "Price paid", QuestionType::Number),
                Question::new("photo", "Upload a photo", QuestionType::File),
                Question::new("again", "Would you come back?", QuestionType::YesNo),
            ],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary() {
        let mut responses = vec![
            response(0, [("dish", Answer::from("Soup")), ("price", 12.0.into())]),
            response(1, [("dish", Answer::from("Soup")), ("price", Answer::Null)]),
            response(2, [("dish", Answer::from("Salad"))]),
        ];
        let mut foreign = response(3, [("dish", "Salad")]);
        foreign.survey_id = "t".into();
        responses.push(foreign);

        let summary = SurveySummary::new(&survey(), &responses);
        assert_eq!(summary.response_count, 3);
        assert_eq!(summary.questions.len(), 4);

        let dish = &summary.questions[0];
        assert_eq!(dish.answered, 3);
        assert_eq!(dish.applicable_tests, [StatTest::ChiSquare]);
        assert_eq!(dish.chi_square_partners, ["again"]);
        assert_eq!(
            dish.distribution,
            Some(AnswerDistribution::Counts {
                buckets: vec![
                    AnswerCount { name: "Salad".into(), count: 1 },
                    AnswerCount { name: "Soup".into(), count: 2 },
                ]
            })
        );

        let price = &summary.questions[1];
        assert_eq!(price.answered, 1);
        assert_eq!(price.applicable_tests, [StatTest::Descriptive]);

        let photo = &summary.questions[2];
        assert_eq!(photo.answered, 0);
        assert!(photo.applicable_tests.is_empty());
        assert!(photo.chi_square_partners.is_empty());
        assert_eq!(photo.distribution, None);

        let again = &summary.questions[3];
        assert_eq!(again.answered, 0);
        assert_eq!(again.chi_square_partners, ["dish"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let summary = SurveySummary::new(&survey(), &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["surveyId"], "s");
        assert_eq!(json["responseCount"], 0);
        assert_eq!(json["questions"][1]["type"], "number");
        assert_eq!(json["questions"][1]["applicableTests"], serde_json::json!(["descriptive"]));
        assert!(json["questions"][2].get("distribution").is_none());
        assert_eq!(json["questions"][0]["chiSquarePartners"], serde_json::json!(["again"]));
        assert!(json["questions"][1].get("chiSquarePartners").is_none());
    }
}
