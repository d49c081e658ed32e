use crate::client::ClientError;
use crate::config::ConfigError;
use crate::decision::OutcomeError;
use crate::prompt::PromptError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Prompt(PromptError),
    Client(ClientError),
    Outcome(OutcomeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Prompt(err) => write!(f, "input error: {err}"),
            AppError::Client(err) => write!(f, "evaluation request failed: {err}"),
            AppError::Outcome(err) => write!(f, "malformed response: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Prompt(err) => Some(err),
            AppError::Client(err) => Some(err),
            AppError::Outcome(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<PromptError> for AppError {
    fn from(value: PromptError) -> Self {
        Self::Prompt(value)
    }
}

impl From<ClientError> for AppError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

impl From<OutcomeError> for AppError {
    fn from(value: OutcomeError) -> Self {
        Self::Outcome(value)
    }
}
