use thiserror::Error;

/// Fatal conditions. Any of these aborts the whole conversion run; recoverable
/// per-cell problems never surface here (they become
/// [`CellWarning`](crate::entities::CellWarning) entries instead).
#[derive(Debug, Error)]
pub enum DealSheetError {
    // IO-related.
    #[error("error reading input file: {0}")]
    Read(#[from] std::io::Error),
    #[error("error writing output workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    // Parsing-related.
    #[error("invalid spreadsheet: {details}")]
    InvalidSheet { details: String },
    #[error("invalid CSV format: {0}")]
    InvalidCsv(#[from] csv::Error),
    #[error("'{column}' column not found in the input sheet")]
    MissingRequiredColumn { column: &'static str },

    // Exchange-rate-related.
    #[error("failed to fetch exchange rates: {0}")]
    RateFetch(#[from] reqwest::Error),
    #[error("invalid exchange-rate response: {details}")]
    InvalidRateResponse { details: String },
}

// Recoverable per-cell conditions. The row mapper degrades these to sentinel
// values; they never cross the public API.

#[derive(Debug, Error)]
#[error("could not parse a numeric amount from '{value}'")]
pub(crate) struct InvalidAmount {
    pub(crate) value: String,
}

#[derive(Debug, Error)]
#[error("'{token}' is not a valid day-first calendar date")]
pub(crate) struct InvalidDateToken {
    pub(crate) token: String,
}
