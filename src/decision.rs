use serde::Deserialize;
use std::fmt;
use tracing::warn;

/// The slice of an Alloy evaluation response this program reads. Extra fields
/// in the body are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationResponse {
    #[serde(default)]
    pub evaluation_token: Option<String>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub outcome: Option<String>,
}

/// Decision classification mapped from `summary.outcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approved,
    ManualReview,
    Denied,
    /// An outcome the mapping does not recognize, surfaced verbatim.
    Other(String),
}

impl Decision {
    /// Extract and classify the outcome. Fails when `summary.outcome` is
    /// absent or blank.
    pub fn from_response(response: &EvaluationResponse) -> Result<Self, OutcomeError> {
        let raw = response
            .summary
            .as_ref()
            .and_then(|summary| summary.outcome.as_deref())
            .map(str::trim)
            .filter(|outcome| !outcome.is_empty())
            .ok_or(OutcomeError::MissingOutcome)?;

        Ok(Self::from_outcome(raw))
    }

    pub fn from_outcome(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "approve" | "approved" => Self::Approved,
            "manual review" | "manual_review" | "review" => Self::ManualReview,
            "deny" | "denied" | "declined" | "rejected" => Self::Denied,
            _ => {
                warn!(outcome = raw, "unrecognized evaluation outcome");
                Self::Other(raw.to_string())
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Decision::Approved => "Approved",
            Decision::ManualReview => "Manual Review",
            Decision::Denied => "Denied",
            Decision::Other(raw) => raw,
        }
    }

    fn message(&self) -> Option<&'static str> {
        match self {
            Decision::Approved => Some("Congratulations! You are approved."),
            Decision::ManualReview => {
                Some("Your application is under review. Please wait for further updates.")
            }
            Decision::Denied => {
                Some("Unfortunately, we cannot approve your application at this time.")
            }
            Decision::Other(_) => None,
        }
    }
}

/// Write the decision (and evaluation token, when present) to the console.
pub fn print_decision(decision: &Decision, response: &EvaluationResponse) {
    println!("Decision: {}", decision.label());
    if let Some(message) = decision.message() {
        println!("{message}");
    }
    if let Some(token) = &response.evaluation_token {
        println!("Evaluation token: {token}");
    }
}

#[derive(Debug)]
pub enum OutcomeError {
    MissingOutcome,
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeError::MissingOutcome => {
                write!(f, "evaluation response did not contain summary.outcome")
            }
        }
    }
}

impl std::error::Error for OutcomeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_outcome(outcome: &str) -> EvaluationResponse {
        serde_json::from_value(json!({ "summary": { "outcome": outcome } }))
            .expect("response parses")
    }

    #[test]
    fn known_outcomes_map_case_insensitively() {
        for raw in ["Approved", "approve", "APPROVED"] {
            assert_eq!(Decision::from_outcome(raw), Decision::Approved);
        }
        for raw in ["Manual Review", "manual_review", "review"] {
            assert_eq!(Decision::from_outcome(raw), Decision::ManualReview);
        }
        for raw in ["Deny", "denied", "declined", "rejected"] {
            assert_eq!(Decision::from_outcome(raw), Decision::Denied);
        }
    }

    #[test]
    fn unknown_outcome_passes_through_verbatim() {
        let decision = Decision::from_outcome("Pending Documents");
        assert_eq!(decision, Decision::Other("Pending Documents".to_string()));
        assert_eq!(decision.label(), "Pending Documents");
    }

    #[test]
    fn missing_outcome_is_an_error() {
        let response: EvaluationResponse =
            serde_json::from_value(json!({ "evaluation_token": "E-1" })).expect("response parses");
        assert!(matches!(
            Decision::from_response(&response),
            Err(OutcomeError::MissingOutcome)
        ));

        let blank = response_with_outcome("   ");
        assert!(Decision::from_response(&blank).is_err());
    }

    #[test]
    fn outcome_is_trimmed_before_classification() {
        let response = response_with_outcome("  Approved  ");
        assert_eq!(
            Decision::from_response(&response).expect("outcome present"),
            Decision::Approved
        );
    }
}
