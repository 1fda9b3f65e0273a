use std::path::PathBuf;

use canvass_analysis::{
    dispatch::{StatTestOutcome, StatTestRequest, run_statistical_test},
    report::StatReport,
};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ChiSquareArg {
    /// Survey definition JSON file
    #[arg(long)]
    survey: PathBuf,
    /// Responses JSON file (array of responses)
    #[arg(long)]
    responses: PathBuf,
    /// Id of the question whose answers form the table rows
    #[arg(long)]
    question1: String,
    /// Id of the question whose answers form the table columns
    #[arg(long)]
    question2: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ChiSquareArg) -> anyhow::Result<()> {
    let ChiSquareArg {
        survey,
        responses,
        question1,
        question2,
        output,
    } = arg;
    let survey = util::read_survey_file(survey)?;
    let responses = util::read_responses_file(&survey, responses)?;

    let request = StatTestRequest::ChiSquare {
        question1: question1.clone(),
        question2: question2.clone(),
    };
    let result = run_statistical_test(&survey, &responses, &request);
    match &result {
        Ok(StatTestOutcome::ChiSquare(association)) => {
            tracing::info!("{}", association.interpretation);
        }
        Ok(StatTestOutcome::Descriptive(_)) => {}
        Err(err) => tracing::warn!(%question1, %question2, "chi-square test failed: {err}"),
    }
    Output::save_json(&StatReport::from(result), output.clone())?;

    Ok(())
}
