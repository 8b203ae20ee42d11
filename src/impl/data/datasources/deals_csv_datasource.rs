use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use csv::StringRecord;

use crate::{
    data::models::cell_value_model,
    domain::entities::{
        cell_value::CellValue,
        deal_row::{input_columns, DealRowSpec},
    },
    errors::DealSheetError,
};

#[async_trait]
pub(crate) trait DealsCsvDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<Vec<DealRowSpec>, DealSheetError>;

    async fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct DealsCsvDatasourceImpl;

impl DealsCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DealsCsvDatasource for DealsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<DealRowSpec>, DealSheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(s.as_bytes());

        let header_map = header_map(reader.headers()?);
        // The only validated precondition; checked before any data row is read.
        if !header_map.contains_key(input_columns::BANK_ACCOUNT) {
            return Err(DealSheetError::MissingRequiredColumn {
                column: input_columns::BANK_ACCOUNT,
            });
        }

        reader
            .records()
            .enumerate()
            .map(|(i, r)| {
                let record = r?;
                // Extract from the CSV record. Header is line 1.
                Ok(DealRowSpec {
                    row: i + 2,
                    amount: cell(&record, &header_map, input_columns::AMOUNT),
                    status: cell(&record, &header_map, input_columns::STATUS),
                    client: text(&record, &header_map, input_columns::CLIENT),
                    service: text(&record, &header_map, input_columns::SERVICE),
                    date: cell(&record, &header_map, input_columns::DATE),
                    owner: text(&record, &header_map, input_columns::OWNER),
                    invoice_number: text(&record, &header_map, input_columns::INVOICE_NUMBER),
                    bank_account: text(&record, &header_map, input_columns::BANK_ACCOUNT),
                })
            })
            .collect()
    }

    async fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path> + Send,
    {
        self.from_string(&tokio::fs::read_to_string(path).await?)
    }
}

fn header_map(header: &StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn cell(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> CellValue {
    header_map
        .get(name)
        .and_then(|idx| record.get(*idx))
        .map(cell_value_model::from_csv_field)
        .unwrap_or(CellValue::Empty)
}

fn text(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> String {
    cell(record, header_map, name).as_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str =
        "Amount,Status,Client,Service,Date,RESPONSABLE GESTION,Invoice number,Bank account";

    #[test]
    fn parses_rows_into_specs() {
        let csv = format!(
            "{FULL_HEADER}\n\
             €100,Paid 15/03/2023,Acme,Consulting,2023-03-01,J. Gestion,INV-1,FR76"
        );
        let specs = DealsCsvDatasourceImpl::new().from_string(&csv).unwrap();
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.row, 2);
        assert_eq!(spec.amount, CellValue::Text("€100".into()));
        assert_eq!(spec.client, "Acme");
        assert_eq!(spec.owner, "J. Gestion");
        assert_eq!(spec.bank_account, "FR76");
    }

    #[test]
    fn missing_bank_account_column_aborts() {
        let csv = "Amount,Status,Client\n€100,Paid,Acme";
        let err = DealsCsvDatasourceImpl::new().from_string(csv).unwrap_err();
        assert!(matches!(
            err,
            DealSheetError::MissingRequiredColumn {
                column: input_columns::BANK_ACCOUNT
            }
        ));
    }

    #[test]
    fn short_records_read_as_empty_cells() {
        let csv = format!("{FULL_HEADER}\n€100,Paid");
        let specs = DealsCsvDatasourceImpl::new().from_string(&csv).unwrap();
        assert_eq!(specs[0].date, CellValue::Empty);
        assert_eq!(specs[0].bank_account, "");
    }
}
