use crate::applicant::Applicant;
use crate::config::AlloyConfig;
use crate::decision::EvaluationResponse;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Alloy sandbox workflow API. One attempt per call,
/// no retries.
pub struct AlloyClient {
    http: Client,
    base_url: String,
    token: String,
    secret: String,
}

impl AlloyClient {
    pub fn new(config: &AlloyConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.workflow_token.clone(),
            secret: config.workflow_secret.clone(),
        })
    }

    /// Submit an applicant for evaluation via `POST /evaluations`.
    pub fn evaluate(&self, applicant: &Applicant) -> Result<EvaluationResponse, ClientError> {
        let url = format!("{}/evaluations", self.base_url);
        debug!(%url, "posting evaluation");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.token, Some(&self.secret))
            .json(applicant)
            .send()
            .map_err(ClientError::Network)?;

        check_status(response)?.json().map_err(ClientError::Network)
    }

    /// Fetch the workflow's expected input parameters via `GET /parameters`.
    /// The body is returned untouched for display.
    pub fn parameters(&self) -> Result<Value, ClientError> {
        let url = format!("{}/parameters", self.base_url);
        debug!(%url, "fetching workflow parameters");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.token, Some(&self.secret))
            .send()
            .map_err(ClientError::Network)?;

        check_status(response)?.json().map_err(ClientError::Network)
    }
}

fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Auth { status }),
        StatusCode::BAD_REQUEST => {
            let detail = response.json::<Value>().ok();
            Err(ClientError::ApiValidation { detail })
        }
        _ => {
            let body = response.text().unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status, body })
        }
    }
}

#[derive(Debug)]
pub enum ClientError {
    Network(reqwest::Error),
    Auth { status: StatusCode },
    ApiValidation { detail: Option<Value> },
    UnexpectedStatus { status: StatusCode, body: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(err) => write!(
                f,
                "could not reach the Alloy API: {err}; check your connection and ALLOY_BASE_URL"
            ),
            ClientError::Auth { status } => write!(
                f,
                "authentication failed ({status}); check ALLOY_WORKFLOW_TOKEN and ALLOY_WORKFLOW_SECRET"
            ),
            ClientError::ApiValidation { detail } => {
                write!(f, "Alloy rejected the payload: {}", render_detail(detail))
            }
            ClientError::UnexpectedStatus { status, body } => {
                write!(f, "unexpected status {status} from Alloy: {body}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Network(err) => Some(err),
            _ => None,
        }
    }
}

/// The 400 body shape is not pinned down by the API docs, so render the usual
/// suspects and fall back to the raw JSON.
fn render_detail(detail: &Option<Value>) -> String {
    let Some(detail) = detail else {
        return "no detail provided".to_string();
    };

    if let Some(errors) = detail.get("errors").and_then(Value::as_array) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|entry| {
                entry
                    .as_str()
                    .or_else(|| entry.get("message").and_then(Value::as_str))
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    if let Some(message) = detail
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| detail.get("message").and_then(Value::as_str))
    {
        return message.to_string();
    }

    detail.to_string()
}
