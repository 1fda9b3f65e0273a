use std::path::PathBuf;

use canvass_analysis::{
    dispatch::{StatTestRequest, run_statistical_test},
    report::StatReport,
};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Survey definition JSON file
    #[arg(long)]
    survey: PathBuf,
    /// Responses JSON file (array of responses)
    #[arg(long)]
    responses: PathBuf,
    /// Id of the question to describe
    #[arg(long)]
    question: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg {
        survey,
        responses,
        question,
        output,
    } = arg;
    let survey = util::read_survey_file(survey)?;
    let responses = util::read_responses_file(&survey, responses)?;

    let request = StatTestRequest::Descriptive {
        question_id: question.clone(),
    };
    let result = run_statistical_test(&survey, &responses, &request);
    if let Err(err) = &result {
        tracing::warn!(question_id = %question, "descriptive statistics failed: {err}");
    }
    Output::save_json(&StatReport::from(result), output.clone())?;

    Ok(())
}
