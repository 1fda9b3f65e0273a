use std::path::PathBuf;

use canvass_analysis::summary::SurveySummary;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Survey definition JSON file
    #[arg(long)]
    survey: PathBuf,
    /// Responses JSON file (array of responses)
    #[arg(long)]
    responses: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let SummarizeArg {
        survey,
        responses,
        output,
    } = arg;
    let survey = util::read_survey_file(survey)?;
    let responses = util::read_responses_file(&survey, responses)?;

    let summary = SurveySummary::new(&survey, &responses);
    Output::save_json(&summary, output.clone())?;

    Ok(())
}
