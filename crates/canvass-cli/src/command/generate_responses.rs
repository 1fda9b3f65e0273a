use std::{collections::BTreeMap, path::PathBuf};

use canvass_model::{Answer, Question, QuestionType, Survey, SurveyResponse};
use chrono::{DateTime, Days, TimeDelta, Utc};
use rand::{
    Rng, SeedableRng as _,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg64Mcg;

use crate::util::{self, Output};

/// Probability that a respondent leaves a question unanswered.
const SKIP_PROBABILITY: f64 = 0.1;
const SUBMISSION_WINDOW_MINUTES: i64 = 30 * 24 * 60;
const DATE_WINDOW_DAYS: u64 = 365;
const DEFAULT_RATING_BOUNDS: (f64, f64) = (1.0, 5.0);
const DEFAULT_NUMBER_BOUNDS: (f64, f64) = (0.0, 100.0);
const DEFAULT_FILE_EXTENSION: &str = "pdf";
const TEXT_ANSWERS: &[&str] = &[
    "Great experience overall",
    "Could be faster",
    "Very helpful staff",
    "Too expensive for what it offers",
    "Nothing to add",
];

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateResponsesArg {
    /// Survey definition JSON file
    #[arg(long)]
    survey: PathBuf,
    /// Number of responses to generate
    #[arg(long, default_value_t = 100)]
    num_responses: usize,
    /// Random seed (chosen at random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateResponsesArg) -> anyhow::Result<()> {
    let GenerateResponsesArg {
        survey,
        num_responses,
        seed,
        output,
    } = arg;
    let survey = util::read_survey_file(survey)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(survey_id = %survey.id, num_responses, seed, "generating responses");

    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let responses = generate_responses(&survey, *num_responses, &mut rng);
    Output::save_json(&responses, output.clone())?;

    Ok(())
}

fn generate_responses<R>(survey: &Survey, count: usize, rng: &mut R) -> Vec<SurveyResponse>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|index| generate_response(survey, index, &mut *rng))
        .collect()
}

fn generate_response<R>(survey: &Survey, index: usize, rng: &mut R) -> SurveyResponse
where
    R: Rng + ?Sized,
{
    let delay = TimeDelta::minutes(rng.random_range(0..SUBMISSION_WINDOW_MINUTES));
    let mut response = SurveyResponse::new(
        format!("{}-r{index:05}", survey.id),
        survey.id.as_str(),
        format!("user-{index:05}"),
        survey.created_at + delay,
    );
    for question in &survey.questions {
        if rng.random_bool(SKIP_PROBABILITY) {
            continue;
        }
        if let Some(answer) = generate_answer(question, survey.created_at, rng) {
            response.answers.insert(question.id.clone(), answer);
        }
    }
    response
}

/// Generates an answer shaped like the stored answers of `question`.
///
/// Returns `None` when the question lacks the metadata its answers need
/// (options, matrix rows or columns).
fn generate_answer<R>(question: &Question, created_at: DateTime<Utc>, rng: &mut R) -> Option<Answer>
where
    R: Rng + ?Sized,
{
    let answer = match question.question_type {
        QuestionType::Text => Answer::from(*TEXT_ANSWERS.choose(rng)?),
        QuestionType::MultipleChoice if question.multiple => {
            let options = question.options.as_deref()?;
            Answer::List(
                options
                    .iter()
                    .filter(|_| rng.random_bool(0.5))
                    .map(|option| Answer::from(option.as_str()))
                    .collect(),
            )
        }
        QuestionType::MultipleChoice | QuestionType::YesNo | QuestionType::Dropdown => {
            Answer::from(*question.categories().choose(rng)?)
        }
        QuestionType::Rating => integer_between(question, DEFAULT_RATING_BOUNDS, rng),
        QuestionType::Number => integer_between(question, DEFAULT_NUMBER_BOUNDS, rng),
        QuestionType::Matrix => {
            let rows = question.rows.as_deref()?;
            let columns = question.columns.as_deref()?;
            let mut cells = BTreeMap::new();
            for row in rows {
                let column = columns.choose(&mut *rng)?;
                cells.insert(row.clone(), Answer::from(column.as_str()));
            }
            Answer::Map(cells)
        }
        QuestionType::Date => {
            let date = created_at.date_naive() + Days::new(rng.random_range(0..=DATE_WINDOW_DAYS));
            Answer::Text(date.format("%Y-%m-%d").to_string())
        }
        QuestionType::File => Answer::Text(format!(
            "upload-{}.{}",
            rng.random_range(1000..10000),
            file_extension(question)
        )),
        QuestionType::Ranking => {
            let mut options = question.options.clone()?;
            options.shuffle(rng);
            Answer::Map(
                options
                    .into_iter()
                    .zip(1_u32..)
                    .map(|(option, rank)| (option, Answer::Number(rank.into())))
                    .collect(),
            )
        }
    };
    Some(answer)
}

/// A whole number within the question's bounds, or `default` when it has none.
fn integer_between<R>(question: &Question, default: (f64, f64), rng: &mut R) -> Answer
where
    R: Rng + ?Sized,
{
    let min = question.min.unwrap_or(default.0).ceil();
    let max = question.max.unwrap_or(default.1).floor();
    let value = if min.is_finite() && max.is_finite() && min <= max {
        rng.random_range(min..=max).round()
    } else {
        default.0
    };
    Answer::Number(value)
}

fn file_extension(question: &Question) -> &str {
    question
        .accept
        .as_deref()
        .and_then(|accept| {
            accept
                .split(',')
                .map(str::trim)
                .find_map(|kind| kind.strip_prefix('.'))
        })
        .unwrap_or(DEFAULT_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use canvass_analysis::{
        dispatch::{StatTestRequest, run_statistical_test},
        summary::SurveySummary,
    };
    use chrono::TimeZone as _;
    use rand::SeedableRng as _;

    use super::*;

    fn survey() -> Survey {
        let mut matrix = Question::new("facilities", "Rate the facilities", QuestionType::Matrix);
        matrix.rows = Some(vec!["Gym".into(), "Pool".into()]);
        matrix.columns = Some(vec!["Poor".into(), "Fine".into(), "Great".into()]);
        let mut upload = Question::new("receipt", "Upload your receipt", QuestionType::File);
        upload.accept = Some("image/*, .png".into());
        Survey {
            id: "stay".into(),
            title: "Hotel stay".into(),
            description: String::new(),
            questions: vec![
                Question::new("comments", "Comments", QuestionType::Text),
                Question::new("room", "Room type", QuestionType::Dropdown)
                    .with_options(["Single", "Double", "Suite"]),
                Question::new("again", "Would you stay again?", QuestionType::YesNo),
                Question::new("extras", "Extras used", QuestionType::MultipleChoice)
                    .with_options(["Breakfast", "Parking", "Spa"])
                    .with_multiple(true),
                Question::new("score", "Overall score", QuestionType::Rating).with_bounds(1.0, 10.0),
                Question::new("nights", "Nights", QuestionType::Number),
                Question::new("arrival", "Arrival date", QuestionType::Date),
                Question::new("priorities", "Rank these", QuestionType::Ranking)
                    .with_options(["Price", "Location", "Comfort"]),
                matrix,
                upload,
            ],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_same_seed_same_responses() {
        let survey = survey();
        let a = generate_responses(&survey, 20, &mut Pcg64Mcg::seed_from_u64(1));
        let b = generate_responses(&survey, 20, &mut Pcg64Mcg::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_answers_match_question_types() {
        let survey = survey();
        let responses = generate_responses(&survey, 200, &mut Pcg64Mcg::seed_from_u64(42));
        assert_eq!(responses.len(), 200);

        for response in &responses {
            assert_eq!(response.survey_id, "stay");
            assert!(response.submitted_at >= survey.created_at);
            for (question_id, answer) in &response.answers {
                let question = survey.question(question_id).unwrap();
                match question.question_type {
                    QuestionType::Rating => {
                        let score = answer.as_number().unwrap();
                        assert!((1.0..=10.0).contains(&score) && score.fract() == 0.0);
                    }
                    QuestionType::YesNo | QuestionType::Dropdown => {
                        let category = answer.as_category().unwrap();
                        assert!(question.categories().contains(&category));
                    }
                    QuestionType::MultipleChoice => {
                        let Answer::List(items) = answer else {
                            panic!("expected a list of selections");
                        };
                        assert!(items.len() <= 3);
                    }
                    QuestionType::Ranking => {
                        let Answer::Map(ranks) = answer else {
                            panic!("expected a ranking map");
                        };
                        let mut ranks = ranks.values().filter_map(Answer::as_number).collect::<Vec<_>>();
                        ranks.sort_by(f64::total_cmp);
                        assert_eq!(ranks, [1.0, 2.0, 3.0]);
                    }
                    QuestionType::Matrix => {
                        let Answer::Map(cells) = answer else {
                            panic!("expected a matrix map");
                        };
                        assert_eq!(cells.keys().collect::<Vec<_>>(), ["Gym", "Pool"]);
                    }
                    QuestionType::File => assert!(answer.to_string().ends_with(".png")),
                    QuestionType::Date => assert!(answer.to_string().starts_with("202")),
                    QuestionType::Text | QuestionType::Number => {}
                }
            }
        }
    }

    #[test]
    fn test_some_questions_are_skipped() {
        let survey = survey();
        let responses = generate_responses(&survey, 100, &mut Pcg64Mcg::seed_from_u64(3));
        let answered = responses.iter().map(|r| r.answers.len()).sum::<usize>();
        assert!(answered < 100 * survey.questions.len());
        assert!(answered > 50 * survey.questions.len());
    }

    #[test]
    fn test_generated_responses_can_be_analyzed() {
        let survey = survey();
        let responses = generate_responses(&survey, 50, &mut Pcg64Mcg::seed_from_u64(9));

        let request = StatTestRequest::ChiSquare {
            question1: "room".into(),
            question2: "again".into(),
        };
        assert!(run_statistical_test(&survey, &responses, &request).is_ok());
        let request = StatTestRequest::Descriptive {
            question_id: "nights".into(),
        };
        assert!(run_statistical_test(&survey, &responses, &request).is_ok());

        let summary = SurveySummary::new(&survey, &responses);
        assert_eq!(summary.response_count, 50);
    }

    #[test]
    fn test_missing_metadata_yields_no_answer() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let dropdown = Question::new("d", "Pick", QuestionType::Dropdown);
        assert_eq!(generate_answer(&dropdown, created_at, &mut rng), None);
        let matrix = Question::new("m", "Grid", QuestionType::Matrix);
        assert_eq!(generate_answer(&matrix, created_at, &mut rng), None);
    }

    #[test]
    fn test_inverted_bounds_fall_back_to_default_minimum() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let question = Question::new("n", "Count", QuestionType::Number).with_bounds(5.0, 1.0);
        assert_eq!(
            integer_between(&question, DEFAULT_NUMBER_BOUNDS, &mut rng),
            Answer::Number(0.0)
        );
    }
}
