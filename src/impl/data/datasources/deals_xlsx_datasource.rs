use std::{collections::HashMap, io::Cursor, path::Path};

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};

use crate::{
    data::models::cell_value_model,
    domain::entities::{
        cell_value::CellValue,
        deal_row::{input_columns, DealRowSpec},
    },
    errors::DealSheetError,
};

pub(crate) trait DealsXlsxDatasource {
    fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path>;

    fn from_bytes(&self, bytes: &[u8]) -> Result<Vec<DealRowSpec>, DealSheetError>;
}

pub(crate) struct DealsXlsxDatasourceImpl;

impl DealsXlsxDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl DealsXlsxDatasource for DealsXlsxDatasourceImpl {
    fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path>,
    {
        let mut workbook = open_workbook_auto(path).map_err(invalid_sheet)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(no_sheets)?
            .map_err(invalid_sheet)?;
        rows_from_range(&range)
    }

    fn from_bytes(&self, bytes: &[u8]) -> Result<Vec<DealRowSpec>, DealSheetError> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(invalid_sheet)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(no_sheets)?
            .map_err(invalid_sheet)?;
        rows_from_range(&range)
    }
}

fn invalid_sheet<E: std::fmt::Display>(e: E) -> DealSheetError {
    DealSheetError::InvalidSheet {
        details: e.to_string(),
    }
}

fn no_sheets() -> DealSheetError {
    DealSheetError::InvalidSheet {
        details: "workbook has no sheets".to_string(),
    }
}

fn rows_from_range(range: &Range<Data>) -> Result<Vec<DealRowSpec>, DealSheetError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| DealSheetError::InvalidSheet {
        details: "input sheet has no header row".to_string(),
    })?;

    let header_map = header_map(header);
    // The only validated precondition; checked before any data row is read.
    if !header_map.contains_key(input_columns::BANK_ACCOUNT) {
        return Err(DealSheetError::MissingRequiredColumn {
            column: input_columns::BANK_ACCOUNT,
        });
    }

    Ok(rows
        .enumerate()
        .map(|(i, cells)| {
            // Extract from the sheet row. Header is sheet row 1.
            DealRowSpec {
                row: i + 2,
                amount: cell(cells, &header_map, input_columns::AMOUNT),
                status: cell(cells, &header_map, input_columns::STATUS),
                client: text(cells, &header_map, input_columns::CLIENT),
                service: text(cells, &header_map, input_columns::SERVICE),
                date: cell(cells, &header_map, input_columns::DATE),
                owner: text(cells, &header_map, input_columns::OWNER),
                invoice_number: text(cells, &header_map, input_columns::INVOICE_NUMBER),
                bank_account: text(cells, &header_map, input_columns::BANK_ACCOUNT),
            }
        })
        .collect())
}

fn header_map(header: &[Data]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| match c {
            Data::String(s) => Some((normalize_header(s), idx)),
            _ => None,
        })
        .collect()
}

/// Excel exports sometimes prefix the first header with a UTF-8 BOM; without
/// stripping it the required-column check would report a false miss.
fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn cell(cells: &[Data], header_map: &HashMap<String, usize>, name: &str) -> CellValue {
    header_map
        .get(name)
        .and_then(|idx| cells.get(*idx))
        .map(cell_value_model::from_xlsx_cell)
        .unwrap_or(CellValue::Empty)
}

fn text(cells: &[Data], header_map: &HashMap<String, usize>, name: &str) -> String {
    cell(cells, header_map, name).as_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_with_header(labels: &[&str]) -> Range<Data> {
        let mut range = Range::new((0, 0), (1, labels.len() as u32 - 1));
        for (i, label) in labels.iter().enumerate() {
            range.set_value((0, i as u32), Data::String(label.to_string()));
        }
        range
    }

    #[test]
    fn missing_bank_account_column_aborts() {
        let range = range_with_header(&[
            input_columns::AMOUNT,
            input_columns::STATUS,
            input_columns::CLIENT,
        ]);
        let err = rows_from_range(&range).unwrap_err();
        assert!(matches!(
            err,
            DealSheetError::MissingRequiredColumn {
                column: input_columns::BANK_ACCOUNT
            }
        ));
    }

    #[test]
    fn lenient_about_every_other_column() {
        let mut range = range_with_header(&[input_columns::BANK_ACCOUNT]);
        range.set_value((1, 0), Data::String("FR76".to_string()));
        let specs = rows_from_range(&range).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].row, 2);
        assert_eq!(specs[0].bank_account, "FR76");
        assert_eq!(specs[0].amount, CellValue::Empty);
        assert_eq!(specs[0].client, "");
    }

    #[test]
    fn bom_prefixed_header_still_matches() {
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), Data::String("\u{feff}Bank account".to_string()));
        range.set_value((1, 0), Data::String("FR76".to_string()));
        assert!(rows_from_range(&range).is_ok());
    }
}
