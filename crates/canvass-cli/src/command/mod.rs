use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    chi_square::ChiSquareArg, describe::DescribeArg, generate_responses::GenerateResponsesArg,
    summarize::SummarizeArg,
};

mod chi_square;
mod describe;
mod generate_responses;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Descriptive statistics of one question's numeric answers
    Describe(#[clap(flatten)] DescribeArg),
    /// Chi-Square test of independence between two categorical questions
    ChiSquare(#[clap(flatten)] ChiSquareArg),
    /// Answer distributions and applicable tests for every question
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Generate synthetic responses for a survey
    GenerateResponses(#[clap(flatten)] GenerateResponsesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match &args.mode {
        Mode::Describe(arg) => describe::run(arg)?,
        Mode::ChiSquare(arg) => chi_square::run(arg)?,
        Mode::Summarize(arg) => summarize::run(arg)?,
        Mode::GenerateResponses(arg) => generate_responses::run(arg)?,
    }
    Ok(())
}

/// Logs to stderr; `RUST_LOG` overrides the level chosen by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_chi_square() {
        let args = CommandArgs::try_parse_from([
            "canvass",
            "-vv",
            "chi-square",
            "--survey",
            "survey.json",
            "--responses",
            "responses.json",
            "--question1",
            "a",
            "--question2",
            "b",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::ChiSquare(_)));
    }
}
