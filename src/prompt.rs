use crate::applicant::{self, Applicant, FieldError};
use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Collects applicant fields from an interactive console session, re-prompting
/// until each field passes its format check. Generic over the reader and
/// writer so tests can drive it with in-memory buffers.
pub struct IntakePrompter<R, W> {
    input: R,
    output: W,
}

impl IntakePrompter<StdinLock<'static>, Stdout> {
    pub fn from_console() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> IntakePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Walk through every applicant field in order. Returns a fully populated
    /// record, or an error when the input stream ends mid-session.
    pub fn collect(&mut self) -> Result<Applicant, PromptError> {
        let name_first = self.required("First name", applicant::parse_required_text)?;
        let name_last = self.required("Last name", applicant::parse_required_text)?;
        let birth_date = self.required("Date of birth (YYYY-MM-DD)", applicant::parse_birth_date)?;
        let ssn = self.required("SSN (9 digits)", applicant::parse_ssn)?;
        let email = self.required("Email address", applicant::parse_email)?;
        let address_line_1 = self.required("Address line 1", applicant::parse_required_text)?;
        let address_line_2 = applicant::parse_optional_text(&self.read_line("Address line 2 (optional)")?);
        let address_city = self.required("City", applicant::parse_required_text)?;
        let address_state = self.required("State (2-letter code)", applicant::parse_state)?;
        let address_postal_code = self.required("ZIP code", applicant::parse_postal_code)?;
        let address_country_code = self.required("Country code [US]", applicant::parse_country)?;

        Ok(Applicant {
            name_first,
            name_last,
            birth_date,
            ssn,
            email,
            address_line_1,
            address_line_2,
            address_city,
            address_state,
            address_postal_code,
            address_country_code,
        })
    }

    fn required<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, FieldError>,
    ) -> Result<T, PromptError> {
        loop {
            let line = self.read_line(label)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn read_line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Aborted);
        }
        Ok(line.trim().to_string())
    }
}

#[derive(Debug)]
pub enum PromptError {
    /// The input stream ended before every field was collected.
    Aborted,
    Io(io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Aborted => write!(f, "input ended before the applicant form was complete"),
            PromptError::Io(err) => write!(f, "console io error: {err}"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Aborted => None,
            PromptError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect_from(lines: &str) -> (Result<Applicant, PromptError>, String) {
        let mut output = Vec::new();
        let result = IntakePrompter::new(Cursor::new(lines.to_string()), &mut output).collect();
        (result, String::from_utf8(output).expect("utf8 output"))
    }

    const VALID_TAIL: &str = "123456789\njane@example.com\n41 Main St\n\nIowa City\nIA\n52240\n\n";

    #[test]
    fn collects_a_full_applicant_record() {
        let input = format!("Jane\nSmith\n1990-05-14\n{VALID_TAIL}");
        let (result, _) = collect_from(&input);
        let applicant = result.expect("record collected");

        assert_eq!(applicant.name_first, "Jane");
        assert_eq!(applicant.name_last, "Smith");
        assert_eq!(applicant.address_line_2, None);
        assert_eq!(applicant.address_country_code, "US");
    }

    #[test]
    fn reprompts_on_malformed_email() {
        let input = "Jane\nSmith\n1990-05-14\n123456789\nnot-an-email\njane@example.com\n41 Main St\n\nIowa City\nIA\n52240\n\n";
        let (result, transcript) = collect_from(input);
        let applicant = result.expect("record collected after re-prompt");

        assert_eq!(applicant.email, "jane@example.com");
        assert!(transcript.contains("Please enter a valid email address."));
        assert_eq!(transcript.matches("Email address:").count(), 2);
    }

    #[test]
    fn eof_mid_session_aborts() {
        let (result, _) = collect_from("Jane\nSmith\n");
        assert!(matches!(result, Err(PromptError::Aborted)));
    }
}
