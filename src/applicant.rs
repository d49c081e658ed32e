use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Two-letter postal codes accepted for `address_state` (50 states + DC).
const VALID_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 120;

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

fn postal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("postal pattern compiles"))
}

/// One applicant's intake data, held in memory for the duration of a run and
/// serialized directly into the Alloy evaluation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applicant {
    pub name_first: String,
    pub name_last: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "document_ssn")]
    pub ssn: String,
    #[serde(rename = "email_address")]
    pub email: String,
    pub address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_postal_code: String,
    pub address_country_code: String,
}

/// Why a submitted field failed its format check. The `Display` text is what
/// the collector shows before re-prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Empty,
    BirthDateFormat,
    AgeOutOfRange,
    SsnFormat,
    EmailFormat,
    UnknownState,
    PostalCodeFormat,
    CountryCodeFormat,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FieldError::Empty => "This field is required.",
            FieldError::BirthDateFormat => "Please enter the date as YYYY-MM-DD.",
            FieldError::AgeOutOfRange => "Applicant must be between 18 and 120 years old.",
            FieldError::SsnFormat => "SSN must be exactly 9 digits (numbers only).",
            FieldError::EmailFormat => "Please enter a valid email address.",
            FieldError::UnknownState => {
                "Invalid state code. Please use a valid 2-letter abbreviation."
            }
            FieldError::PostalCodeFormat => "ZIP code must be 5 digits (or ZIP+4).",
            FieldError::CountryCodeFormat => "Country must be a 2-letter code.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for FieldError {}

pub fn parse_required_text(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Parse a `YYYY-MM-DD` date of birth and require a realistic adult age.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, FieldError> {
    parse_birth_date_as_of(raw, Local::now().date_naive())
}

fn parse_birth_date_as_of(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let dob = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::BirthDateFormat)?;
    match today.years_since(dob) {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(dob),
        _ => Err(FieldError::AgeOutOfRange),
    }
}

pub fn parse_ssn(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.len() == 9 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(FieldError::SsnFormat)
    }
}

/// Validated email addresses are lowercased before they reach the payload.
pub fn parse_email(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if email_pattern().is_match(trimmed) {
        Ok(trimmed.to_ascii_lowercase())
    } else {
        Err(FieldError::EmailFormat)
    }
}

pub fn parse_state(raw: &str) -> Result<String, FieldError> {
    let code = raw.trim().to_ascii_uppercase();
    if VALID_STATES.contains(&code.as_str()) {
        Ok(code)
    } else {
        Err(FieldError::UnknownState)
    }
}

pub fn parse_postal_code(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if postal_pattern().is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(FieldError::PostalCodeFormat)
    }
}

/// Country defaults to US when left blank; anything else must be a 2-letter
/// alpha code.
pub fn parse_country(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok("US".to_string());
    }
    if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(FieldError::CountryCodeFormat)
    }
}

/// Blank optional lines become `None` so they are omitted from the payload.
pub fn parse_optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
