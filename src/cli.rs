use crate::client::AlloyClient;
use crate::config::AppConfig;
use crate::decision::{self, Decision};
use crate::error::AppError;
use crate::prompt::IntakePrompter;
use crate::telemetry;
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Alloy Applicant Intake",
    about = "Collect applicant details and evaluate them against the Alloy sandbox workflow",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect applicant details interactively and submit them for evaluation (default command)
    Evaluate(EvaluateArgs),
    /// Print the workflow's expected input parameters and exit
    Parameters,
}

#[derive(Args, Debug, Default)]
struct EvaluateArgs {
    /// Dump the workflow parameters before prompting for applicant details
    #[arg(long)]
    show_parameters: bool,
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Evaluate(EvaluateArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let client = AlloyClient::new(&config.alloy)?;

    match command {
        Command::Evaluate(args) => run_evaluate(&client, args),
        Command::Parameters => print_parameters(&client),
    }
}

fn run_evaluate(client: &AlloyClient, args: EvaluateArgs) -> Result<(), AppError> {
    if args.show_parameters {
        print_parameters(client)?;
        println!();
    }

    let mut prompter = IntakePrompter::from_console();
    let applicant = prompter.collect()?;

    info!("submitting applicant for evaluation");
    let response = client.evaluate(&applicant)?;
    let outcome = Decision::from_response(&response)?;
    decision::print_decision(&outcome, &response);

    Ok(())
}

fn print_parameters(client: &AlloyClient) -> Result<(), AppError> {
    let parameters = client.parameters()?;
    println!("Workflow parameters:");
    println!("{parameters:#}");
    Ok(())
}
