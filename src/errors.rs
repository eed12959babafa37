//! Error types with diagnostics using miette
//!
//! Only the calendar can reject its input; every other widget substitutes
//! defaults and always produces a document.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while turning calendar query tokens into a layout
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Invalid progress day format: {token}")]
    #[diagnostic(
        code(readme_widgets::calendar::invalid_day),
        help("progressDays is a comma-separated list of integers, e.g. `1,15,22`")
    )]
    InvalidDay { token: String },

    #[error("Invalid year format: {token}")]
    #[diagnostic(code(readme_widgets::calendar::invalid_year))]
    InvalidYear { token: String },

    #[error("Invalid month format: {token}")]
    #[diagnostic(code(readme_widgets::calendar::invalid_month_format))]
    InvalidMonthFormat { token: String },

    #[error("Month must be between 1 and 12")]
    #[diagnostic(code(readme_widgets::calendar::invalid_month))]
    InvalidMonth { month: i64 },

    #[error("Year {year} is outside the supported range")]
    #[diagnostic(
        code(readme_widgets::calendar::year_out_of_range),
        help("years between -999999 and 999999 are supported")
    )]
    YearOutOfRange { year: i64 },
}

impl WidgetError {
    /// The offending query token, when the error came from parsing one.
    pub fn token(&self) -> Option<&str> {
        match self {
            WidgetError::InvalidDay { token }
            | WidgetError::InvalidYear { token }
            | WidgetError::InvalidMonthFormat { token } => Some(token),
            WidgetError::InvalidMonth { .. } | WidgetError::YearOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_client_text() {
        let err = WidgetError::InvalidDay { token: "x".into() };
        assert_eq!(err.to_string(), "Invalid progress day format: x");
        assert_eq!(err.token(), Some("x"));
        assert_eq!(
            WidgetError::InvalidMonth { month: 13 }.to_string(),
            "Month must be between 1 and 12"
        );
        assert_eq!(WidgetError::InvalidMonth { month: 13 }.token(), None);
    }

    #[test]
    fn format_errors_name_the_token() {
        let year = WidgetError::InvalidYear { token: "20x4".into() };
        assert_eq!(year.to_string(), "Invalid year format: 20x4");
        let month = WidgetError::InvalidMonthFormat { token: "jan".into() };
        assert_eq!(month.to_string(), "Invalid month format: jan");
        assert_eq!(month.token(), Some("jan"));
    }

    #[test]
    fn diagnostics_carry_codes() {
        let err = WidgetError::InvalidYear { token: "abc".into() };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("readme_widgets::calendar::invalid_year"));
    }
}
