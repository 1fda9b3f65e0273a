//! Which statistical tests apply to which questions

use canvass_model::{Question, QuestionType, Survey};
use serde::{Deserialize, Serialize};

/// A statistical test offered on the results screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum StatTest {
    #[display("Descriptive Statistics")]
    Descriptive,
    #[display("Chi-Square Test")]
    ChiSquare,
}

/// Returns the tests that can be started from `question`.
///
/// Choice questions offer the Chi-Square test (except multi-select ones,
/// whose answers are not single categories). Rating, number and ranking
/// questions offer descriptive statistics. Other types offer nothing.
///
/// Ranking answers are stored as option-to-rank maps, which have no numeric
/// projection, so descriptive statistics on a ranking question fail with
/// [`AnalysisError::NoNumericalData`](crate::AnalysisError::NoNumericalData).
///
/// # Examples
///
/// ```
/// # use canvass_analysis::catalogue::{applicable_tests, StatTest};
/// # use canvass_model::{Question, QuestionType};
/// let rating = Question::new("q", "Score", QuestionType::Rating);
/// assert_eq!(applicable_tests(&rating), [StatTest::Descriptive]);
/// let text = Question::new("q", "Comments", QuestionType::Text);
/// assert!(applicable_tests(&text).is_empty());
/// ```
#[must_use]
pub fn applicable_tests(question: &Question) -> &'static [StatTest] {
    match question.question_type {
        QuestionType::MultipleChoice | QuestionType::YesNo | QuestionType::Dropdown => {
            if question.is_categorical() {
                &[StatTest::ChiSquare]
            } else {
                &[]
            }
        }
        QuestionType::Rating | QuestionType::Number | QuestionType::Ranking => {
            &[StatTest::Descriptive]
        }
        QuestionType::Text | QuestionType::Matrix | QuestionType::Date | QuestionType::File => &[],
    }
}

/// Returns the questions of `survey` that can be paired with `question` in a
/// Chi-Square test.
pub fn chi_square_partners<'a>(
    survey: &'a Survey,
    question: &'a Question,
) -> impl Iterator<Item = &'a Question> + 'a {
    survey
        .questions
        .iter()
        .filter(move |q| q.id != question.id && q.is_categorical())
}
