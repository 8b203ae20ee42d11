use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{domain::entities::deal_row::DealRecord, errors::DealSheetError};

/// Suggested filename for delivering the output workbook.
pub const SUGGESTED_FILE_NAME: &str = "output_sheet.xlsx";

/// MIME type of the output workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// Output column labels, in schema order.
const OUTPUT_COLUMNS: [&str; 10] = [
    "Amount",
    "Close Date",
    "Company Name",
    "Deal Description",
    "Deal Name",
    "Deal Owner",
    "Forecast Amount",
    "Create Date",
    "Invoice Number",
    "Bank account",
];

pub(crate) struct DealsXlsxPrinter;

impl DealsXlsxPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn to_buffer(&self, records: &[DealRecord]) -> Result<Vec<u8>, DealSheetError> {
        let mut workbook = self.workbook(records)?;
        Ok(workbook.save_to_buffer()?)
    }

    pub(crate) fn to_file<P>(&self, path: P, records: &[DealRecord]) -> Result<(), DealSheetError>
    where
        P: AsRef<Path>,
    {
        let mut workbook = self.workbook(records)?;
        workbook.save(path.as_ref())?;
        Ok(())
    }

    fn workbook(&self, records: &[DealRecord]) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Deals")?;

        for (col, label) in OUTPUT_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *label)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, record.amount)?;
            sheet.write_string(row, 1, record.close_date.as_str())?;
            sheet.write_string(row, 2, record.company_name.as_str())?;
            sheet.write_string(row, 3, record.deal_description.as_str())?;
            sheet.write_string(row, 4, record.deal_name.as_str())?;
            sheet.write_string(row, 5, record.deal_owner.as_str())?;
            sheet.write_number(row, 6, record.forecast_amount)?;
            sheet.write_string(row, 7, record.create_date.as_str())?;
            sheet.write_string(row, 8, record.invoice_number.as_str())?;
            sheet.write_string(row, 9, record.bank_account.as_str())?;
        }

        Ok(workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DealRecord {
        DealRecord {
            amount: 235.29,
            close_date: "2023-03-15 05:00".into(),
            company_name: "Acme".into(),
            deal_description: "Consulting".into(),
            deal_name: "Mar-23 Acme".into(),
            deal_owner: "J. Gestion".into(),
            forecast_amount: 235.29,
            create_date: "2023-03-01 00:00".into(),
            invoice_number: "INV-77".into(),
            bank_account: "FR76".into(),
        }
    }

    #[test]
    fn buffer_is_a_zip_workbook() {
        let buffer = DealsXlsxPrinter::new().to_buffer(&[record()]).unwrap();
        // xlsx is a zip container.
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn empty_input_still_writes_the_header() {
        let buffer = DealsXlsxPrinter::new().to_buffer(&[]).unwrap();
        assert!(!buffer.is_empty());
    }
}
