//! Per-question answer distributions for result charts
//!
//! | question type                      | distribution                                 |
//! |------------------------------------|----------------------------------------------|
//! | `rating`, `yesNo`, `dropdown`      | count of each distinct given answer          |
//! | `multiple-choice` (with options)   | count of each selected option                |
//! | `ranking` (with options)           | how often each option was ranked first       |
//! | `number`                           | histogram with bins of width 10              |
//! | `text`                             | the given answers                            |
//! | `matrix`, `date`, `file`           | none                                         |
//!
//! Buckets are sorted by name in natural order, so `"2"` comes before `"10"`.

use std::{cmp::Ordering, collections::BTreeMap};

use canvass_model::{Answer, Question, QuestionType, SurveyResponse};
use canvass_stats::histogram::Histogram;
use serde::Serialize;

/// Bin width of number question histograms.
pub const NUMBER_BIN_WIDTH: f64 = 10.0;

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnswerDistribution {
    /// Frequency of each answer, option or histogram bin.
    Counts { buckets: Vec<AnswerCount> },
    /// The given free-text answers in response order.
    TextAnswers { answers: Vec<String> },
}

impl AnswerDistribution {
    /// Computes the distribution of the answers to `question`.
    ///
    /// Returns `None` for question types that have no chart.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_analysis::distribution::{AnswerCount, AnswerDistribution};
    /// # use canvass_model::{Question, QuestionType, SurveyResponse};
    /// # use chrono::Utc;
    /// let question = Question::new("q", "Score", QuestionType::Rating);
    /// let responses = [4.0, 10.0, 4.0]
    ///     .map(|v| SurveyResponse::new("r", "s", "u", Utc::now()).with_answer("q", v));
    /// let AnswerDistribution::Counts { buckets } =
    ///     AnswerDistribution::for_question(&question, &responses).unwrap()
    /// else {
    ///     unreachable!()
    /// };
    /// assert_eq!(buckets[0], AnswerCount { name: "4".into(), count: 2 });
    /// assert_eq!(buckets[1], AnswerCount { name: "10".into(), count: 1 });
    /// ```
    pub fn for_question<'a, I>(question: &Question, responses: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SurveyResponse>,
    {
        let answers = responses
            .into_iter()
            .filter_map(|response| response.answer(&question.id));
        let buckets = match question.question_type {
            QuestionType::Rating | QuestionType::YesNo | QuestionType::Dropdown => {
                count_by_name(answers.filter(|a| a.is_truthy()))
            }
            QuestionType::MultipleChoice => match &question.options {
                Some(_) => count_by_name(answers.flat_map(selections).filter(|a| a.is_truthy())),
                None => vec![],
            },
            QuestionType::Ranking => match &question.options {
                Some(options) => first_place_counts(options, answers),
                None => vec![],
            },
            QuestionType::Number => number_bins(answers),
            QuestionType::Text => {
                let answers = answers
                    .filter(|a| a.is_truthy())
                    .map(ToString::to_string)
                    .collect();
                return Some(Self::TextAnswers { answers });
            }
            QuestionType::Matrix | QuestionType::Date | QuestionType::File => return None,
        };
        Some(Self::Counts {
            buckets: sort_buckets(buckets),
        })
    }
}

/// The individual selections of a choice answer. A scalar is a single selection.
fn selections(answer: &Answer) -> Vec<&Answer> {
    match answer {
        Answer::List(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn count_by_name<'a, I>(answers: I) -> Vec<AnswerCount>
where
    I: IntoIterator<Item = &'a Answer>,
{
    let mut counts = BTreeMap::<String, u64>::new();
    for answer in answers {
        *counts.entry(answer.to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| AnswerCount { name, count })
        .collect()
}

fn first_place_counts<'a, I>(options: &[String], answers: I) -> Vec<AnswerCount>
where
    I: IntoIterator<Item = &'a Answer>,
{
    let mut counts = options
        .iter()
        .map(|option| (option.clone(), 0_u64))
        .collect::<BTreeMap<_, _>>();
    for answer in answers {
        let Answer::Map(ranks) = answer else {
            continue;
        };
        for (option, rank) in ranks {
            if *rank == Answer::Number(1.0) {
                *counts.entry(option.clone()).or_default() += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| AnswerCount { name, count })
        .collect()
}

fn number_bins<'a, I>(answers: I) -> Vec<AnswerCount>
where
    I: Iterator<Item = &'a Answer>,
{
    let histogram = Histogram::with_bin_width(answers.filter_map(Answer::as_number), NUMBER_BIN_WIDTH);
    histogram
        .bins
        .into_iter()
        .map(|bin| AnswerCount {
            name: format!("{}-{}", bin.range.start, bin.range.start + NUMBER_BIN_WIDTH - 1.0),
            count: bin.count,
        })
        .collect()
}

fn sort_buckets(mut buckets: Vec<AnswerCount>) -> Vec<AnswerCount> {
    buckets.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    buckets
}

/// Compares strings so that embedded digit runs are ordered by numeric value.
///
/// Non-digit runs are compared case-insensitively first.
///
/// # Examples
///
/// ```
/// # use canvass_analysis::distribution::natural_cmp;
/// # use std::cmp::Ordering;
/// assert_eq!(natural_cmp("2", "10"), Ordering::Less);
/// assert_eq!(natural_cmp("item 10", "Item 9"), Ordering::Greater);
/// assert_eq!(natural_cmp("0-9", "10-19"), Ordering::Less);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut lhs = Chunks(a);
    let mut rhs = Chunks(b);
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (is_digits(x), is_digits(y)) {
                    (true, true) => compare_digit_runs(x, y),
                    (false, false) => x.to_lowercase().cmp(&y.to_lowercase()),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                };
                if ordering.is_ne() {
                    return ordering;
                }
            }
        }
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

fn compare_digit_runs(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Splits a string into alternating runs of ASCII digits and other characters.
struct Chunks<'a>(&'a str);

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.0.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .0
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.0.len());
        let (chunk, rest) = self.0.split_at(end);
        self.0 = rest;
        Some(chunk)
    }
}
