pub mod applicant;
pub mod cli;
pub mod client;
pub mod config;
pub mod decision;
pub mod error;
pub mod prompt;
pub mod telemetry;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
