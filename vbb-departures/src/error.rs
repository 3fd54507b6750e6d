//! Application error type and exit codes.

use std::error::Error as _;
use std::fmt::Write as _;

use crate::cli::PromptError;
use crate::domain::{ProductError, WhenError};
use crate::transit::TransitError;

/// Exit code for invalid user input.
pub const EXIT_USAGE: u8 = 2;

/// Exit code when the user closes input during a prompt.
pub const EXIT_CANCELLED: u8 = 130;

/// Any failure of the departures pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Station input was blank
    #[error("no station given")]
    NoStation,

    /// Search or lookup found nothing
    #[error("no station found for \"{0}\"")]
    StationNotFound(String),

    #[error(transparent)]
    TimeParse(#[from] WhenError),

    #[error("invalid result count \"{0}\": expected a positive integer")]
    InvalidResultCount(String),

    #[error("invalid product list")]
    InvalidProducts(#[from] ProductError),

    /// Remote request failed
    #[error("failed to fetch from transit API")]
    Fetch(#[from] TransitError),

    #[error("prompt cancelled")]
    PromptCancelled,

    #[error("prompt failed")]
    Prompt(#[source] std::io::Error),

    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => AppError::PromptCancelled,
            PromptError::Io(e) => AppError::Prompt(e),
        }
    }
}

impl AppError {
    /// Process exit code for this failure. Never zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::TimeParse(_) | AppError::InvalidResultCount(_) | AppError::InvalidProducts(_) => {
                EXIT_USAGE
            }
            AppError::PromptCancelled => EXIT_CANCELLED,
            _ => 1,
        }
    }

    /// Diagnostic text for stderr: the error followed by its causes.
    pub fn report(&self) -> String {
        let mut out = format!("error: {self}\n");
        let mut source = self.source();
        while let Some(cause) = source {
            let _ = writeln!(out, "  caused by: {cause}");
            source = cause.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductSet;

    #[test]
    fn error_display() {
        assert_eq!(AppError::NoStation.to_string(), "no station given");
        assert_eq!(
            AppError::StationNotFound("Atlantis".into()).to_string(),
            "no station found for \"Atlantis\""
        );
        assert_eq!(
            AppError::InvalidResultCount("many".into()).to_string(),
            "invalid result count \"many\": expected a positive integer"
        );
        assert_eq!(AppError::PromptCancelled.to_string(), "prompt cancelled");
    }

    #[test]
    fn exit_codes_are_nonzero() {
        let product_err = ProductSet::parse("zeppelin").unwrap_err();
        let errors = [
            (AppError::NoStation, 1),
            (AppError::StationNotFound("x".into()), 1),
            (AppError::InvalidResultCount("0".into()), EXIT_USAGE),
            (AppError::InvalidProducts(product_err), EXIT_USAGE),
            (AppError::Fetch(TransitError::RateLimited), 1),
            (AppError::PromptCancelled, EXIT_CANCELLED),
            (AppError::Output(std::io::Error::other("disk full")), 1),
        ];

        for (err, code) in errors {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn prompt_errors_convert() {
        assert!(matches!(
            AppError::from(PromptError::Cancelled),
            AppError::PromptCancelled
        ));
        let io = std::io::Error::other("terminal gone");
        assert!(matches!(
            AppError::from(PromptError::Io(io)),
            AppError::Prompt(_)
        ));
    }

    #[test]
    fn report_includes_cause_chain() {
        let err = AppError::Fetch(TransitError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        });

        assert_eq!(
            err.report(),
            "error: failed to fetch from transit API\n  caused by: API error 503: Service Unavailable\n"
        );
    }

    #[test]
    fn report_for_transparent_error() {
        let err: AppError = crate::domain::parse_when("soonish", &chrono::Utc::now())
            .unwrap_err()
            .into();

        assert_eq!(
            err.report(),
            "error: cannot understand time \"soonish\": unrecognised phrase\n"
        );
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }
}
