//! Statistical analysis of survey responses
//!
//! This crate turns a survey's response set into the numbers shown on the
//! results screen. Every operation is a pure function of the questions and
//! responses passed in; nothing is cached or persisted.
//!
//! # Overview
//!
//! ## Statistical tests
//!
//! 1. **Descriptive statistics** ([`descriptive::describe_question`]): mean,
//!    median, mode and range of the numeric answers to one question
//! 2. **Chi-Square test of independence** ([`association::test_association`]):
//!    whether the answers to two categorical questions are associated
//! 3. **Dispatch** ([`dispatch::run_statistical_test`]): resolve a
//!    [`dispatch::StatTestRequest`] against a survey and run it
//!
//! Failures (unsuitable question types, no usable data) are reported as
//! [`AnalysisError`] values. They can be turned into the success/failure
//! document consumed by the results screen with [`report::StatReport`].
//!
//! ## Result charts
//!
//! - **Answer distributions** ([`distribution::AnswerDistribution`]): per-question
//!   frequency counts, histograms and free-text answer lists
//! - **Analysis catalogue** ([`catalogue`]): which tests apply to which question
//! - **Survey summary** ([`summary::SurveySummary`]): all of the above for every question
//!
//! # Examples
//!
//! ```
//! use canvass_analysis::{association::test_association, descriptive::describe_question};
//! use canvass_model::{Question, QuestionType, SurveyResponse};
//! # use chrono::Utc;
//!
//! let plan = Question::new("plan", "Which plan?", QuestionType::Dropdown)
//!     .with_options(["Free", "Pro"]);
//! let renew = Question::new("renew", "Will you renew?", QuestionType::YesNo);
//!
//! let responses = [("Free", "No", 3.0), ("Pro", "Yes", 9.0), ("Pro", "Yes", 8.0)]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, (p, r, score))| {
//!         SurveyResponse::new(format!("r{i}"), "s", format!("u{i}"), Utc::now())
//!             .with_answer("plan", p)
//!             .with_answer("renew", r)
//!             .with_answer("score", score)
//!     })
//!     .collect::<Vec<_>>();
//!
//! let summary = describe_question(&responses, "score").unwrap();
//! assert_eq!(summary.stats.median, 8.0);
//!
//! let result = test_association(&responses, &plan, &renew).unwrap();
//! assert_eq!(result.test.degrees_of_freedom, 1);
//! ```

use canvass_model::QuestionType;

pub mod association;
pub mod catalogue;
pub mod descriptive;
pub mod dispatch;
pub mod distribution;
pub mod report;
pub mod summary;

/// Reasons an analysis cannot be computed from the given input.
///
/// Degenerate but valid data (empty contingency cells, zero degrees of
/// freedom) is not an error; those cases produce well-defined numbers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("No valid numerical data found for question '{question_id}'")]
    NoNumericalData { question_id: String },
    #[display(
        "Chi-Square requires categorical questions, but '{question_id}' is a {question_type} question"
    )]
    NotCategorical {
        question_id: String,
        question_type: QuestionType,
    },
    #[display("Chi-Square requires categorical questions, but '{question_id}' allows multiple selections")]
    MultiSelect { question_id: String },
    #[display("Question '{question_id}' has no answer options to use as categories")]
    NoCategories { question_id: String },
    #[display("Question '{question_id}' not found in survey '{survey_id}'")]
    UnknownQuestion {
        question_id: String,
        survey_id: String,
    },
}
