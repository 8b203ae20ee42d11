use super::cell_value::CellValue;

// Input column labels, as they appear verbatim in the source header row.
pub mod input_columns {
    pub const AMOUNT: &str = "Amount";
    pub const STATUS: &str = "Status";
    pub const CLIENT: &str = "Client";
    pub const SERVICE: &str = "Service";
    pub const DATE: &str = "Date";
    pub const OWNER: &str = "RESPONSABLE GESTION";
    pub const INVOICE_NUMBER: &str = "Invoice number";
    pub const BANK_ACCOUNT: &str = "Bank account";
}

// Before mapping.
// ---

/// One row of the source sheet, cells still raw. Only the presence of the
/// `Bank account` column is validated at ingest; everything else is read
/// leniently and absorbed downstream.
#[derive(Debug, Clone)]
pub struct DealRowSpec {
    /// 1-based row number in the source sheet (header is row 1), for
    /// diagnostics.
    pub row: usize,
    pub amount: CellValue,
    pub status: CellValue,
    pub client: String,
    pub service: String,
    pub date: CellValue,
    pub owner: String,
    pub invoice_number: String,
    pub bank_account: String,
}

// After mapping.
// ---

/// One row of the output sheet, fixed 10-column deals-import schema.
/// `amount` and `forecast_amount` are always equal.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    pub amount: f64,
    pub close_date: String,
    pub company_name: String,
    pub deal_description: String,
    pub deal_name: String,
    pub deal_owner: String,
    pub forecast_amount: f64,
    pub create_date: String,
    pub invoice_number: String,
    pub bank_account: String,
}
