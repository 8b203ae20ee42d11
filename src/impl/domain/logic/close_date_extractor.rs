use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::InvalidDateToken;

/// Sentinel written to `Close Date` (and `Create Date`) when no usable date
/// can be derived. Part of the target schema, not an error.
pub(crate) const DATE_MISSING: &str = "Date missing";

/// Fixed time-of-day suffix of the target schema. A convention of the
/// downstream import format, not a real clock time.
const CLOSE_TIME_SUFFIX: &str = "05:00";

fn date_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("date token pattern is valid"))
}

#[derive(Debug, PartialEq)]
pub(crate) struct ExtractedCloseDate {
    pub(crate) value: String,
    pub(crate) warning: Option<String>,
}

/// Pull a close date out of a raw status cell.
///
/// The first `DD/DD/DDDD` token is parsed day-first and rendered as
/// `YYYY-MM-DD 05:00`. A status with no token yields `"Date missing"`
/// silently; a token that is not a real calendar date yields the same
/// sentinel plus a diagnostic.
pub(crate) fn extract_close_date(status: &str) -> ExtractedCloseDate {
    let Some(token) = date_token_re().find(status) else {
        return ExtractedCloseDate {
            value: DATE_MISSING.to_string(),
            warning: None,
        };
    };

    match NaiveDate::parse_from_str(token.as_str(), "%d/%m/%Y") {
        Ok(date) => ExtractedCloseDate {
            value: format!("{} {}", date.format("%Y-%m-%d"), CLOSE_TIME_SUFFIX),
            warning: None,
        },
        Err(_) => ExtractedCloseDate {
            value: DATE_MISSING.to_string(),
            warning: Some(
                InvalidDateToken {
                    token: token.as_str().to_string(),
                }
                .to_string(),
            ),
        },
    }
}
