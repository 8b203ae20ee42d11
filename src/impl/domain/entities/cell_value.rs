use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A single spreadsheet cell, reduced to the explicit union of shapes the
/// pipeline accepts. Typed cells are normalized to text before they reach the
/// core parsers, so those only ever see one input type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// A cell the workbook already stored as a typed date/time.
    DateTime(NaiveDateTime),
    Empty,
}

/// Text formats accepted for the `Date` column when the cell is not a typed
/// date. ISO first, then the day-first forms common in exported sheets.
const DATE_TIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

impl CellValue {
    /// String representation of the cell, as the core parsers see it.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => format!("{}", n),
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Interpret the cell as a calendar date-time, if possible. Numbers are
    /// treated as spreadsheet serial dates (days since 1899-12-30, fractional
    /// part carrying the time of day).
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Number(serial) => from_excel_serial(*serial),
            CellValue::Text(s) => parse_datetime_text(s.trim()),
            CellValue::Empty => None,
        }
    }
}

fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let secs = (serial.fract() * 86_400.0).round() as i64;
    base.checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))
}

fn parse_datetime_text(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATE_TIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}
