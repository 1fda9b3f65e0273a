//! Chi-Square test of independence between two categorical questions
//!
//! # Procedure
//!
//! 1. Check that both questions are categorical (single-choice, yes/no or
//!    dropdown) and collect their categories.
//! 2. Build a contingency table with one row per category of the first
//!    question and one column per category of the second.
//! 3. Count every response whose two answers are both text matching a
//!    category. Other responses are left out of the table.
//! 4. Run the chi-square test on the table.
//!
//! Zero responses give an empty table, which is a valid input: the statistic
//! is 0 and the p-value 1.

use canvass_model::{Question, SurveyResponse};
use canvass_stats::{chi_square::ChiSquareTest, contingency::ContingencyTable};
use serde::Serialize;

use crate::AnalysisError;

/// Reference to a question in an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRef {
    pub id: String,
    pub text: String,
}

impl From<&Question> for QuestionRef {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
        }
    }
}

/// Observed and expected frequencies labelled with their categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledContingencyTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub observed: ContingencyTable,
    pub expected: Vec<Vec<f64>>,
}

/// Result of a Chi-Square test between two questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationResult {
    pub question1: QuestionRef,
    pub question2: QuestionRef,
    #[serde(flatten)]
    pub test: ChiSquareTest,
    pub interpretation: String,
    pub contingency: LabeledContingencyTable,
    /// Responses that contributed to the table.
    pub sample_size: u64,
}

/// Tests whether the answers to `question1` and `question2` are associated.
///
/// # Errors
///
/// Returns an error if either question is not categorical, or has no
/// categories. `question1` is checked first.
pub fn test_association<'a, I>(
    responses: I,
    question1: &Question,
    question2: &Question,
) -> Result<AssociationResult, AnalysisError>
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let row_categories = categories_of(question1)?;
    let col_categories = categories_of(question2)?;

    let table = build_contingency_table(
        responses,
        (question1.id.as_str(), row_categories.as_slice()),
        (question2.id.as_str(), col_categories.as_slice()),
    );
    let test = ChiSquareTest::from_table(&table);
    tracing::debug!(
        question1 = %question1.id,
        question2 = %question2.id,
        sample_size = table.grand_total(),
        statistic = test.statistic,
        p_value = test.p_value,
        "computed chi-square test"
    );

    Ok(AssociationResult {
        question1: question1.into(),
        question2: question2.into(),
        interpretation: interpret(&test, question1, question2),
        sample_size: table.grand_total(),
        contingency: LabeledContingencyTable {
            row_labels: row_categories.iter().map(|&c| c.to_owned()).collect(),
            column_labels: col_categories.iter().map(|&c| c.to_owned()).collect(),
            expected: table.expected_frequencies(),
            observed: table,
        },
        test,
    })
}

/// Returns the categories of a question usable in a Chi-Square test.
///
/// # Errors
///
/// Returns an error if the question is not categorical or has no categories.
pub fn categories_of(question: &Question) -> Result<Vec<&str>, AnalysisError> {
    if question.is_multi_select() {
        return Err(AnalysisError::MultiSelect {
            question_id: question.id.clone(),
        });
    }
    if !question.is_categorical() {
        return Err(AnalysisError::NotCategorical {
            question_id: question.id.clone(),
            question_type: question.question_type,
        });
    }
    let categories = question.categories();
    if categories.is_empty() {
        return Err(AnalysisError::NoCategories {
            question_id: question.id.clone(),
        });
    }
    Ok(categories)
}

/// Counts joint answers into a table indexed by the given category lists.
///
/// An answer is assigned to the first category equal to it.
pub fn build_contingency_table<'a, I>(
    responses: I,
    (row_question_id, row_categories): (&str, &[&str]),
    (col_question_id, col_categories): (&str, &[&str]),
) -> ContingencyTable
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut table = ContingencyTable::new(row_categories.len(), col_categories.len());
    let mut skipped = 0_usize;
    for response in responses {
        let row = category_index(response, row_question_id, row_categories);
        let col = category_index(response, col_question_id, col_categories);
        match (row, col) {
            (Some(row), Some(col)) => table.increment(row, col),
            _ => skipped += 1,
        }
    }
    tracing::trace!(
        row_question_id,
        col_question_id,
        skipped,
        "built contingency table"
    );
    table
}

fn category_index(response: &SurveyResponse, question_id: &str, categories: &[&str]) -> Option<usize> {
    let answer = response.answer(question_id)?.as_category()?;
    categories.iter().position(|&category| category == answer)
}

fn interpret(test: &ChiSquareTest, question1: &Question, question2: &Question) -> String {
    let p_value = if test.p_value < 0.0001 {
        "p < 0.0001".to_owned()
    } else {
        format!("p = {:.4}", test.p_value)
    };
    let verdict = if test.is_significant {
        "There is a statistically significant association"
    } else {
        "There is no statistically significant association"
    };
    format!(
        "{verdict} between \"{}\" and \"{}\" (χ² = {:.4}, df = {}, {p_value}).",
        question1.text, question2.text, test.statistic, test.degrees_of_freedom
    )
}
