use std::path::Path;

use async_trait::async_trait;

use crate::{domain::entities::deal_row::DealRowSpec, errors::DealSheetError};

#[async_trait]
pub(crate) trait RecordsRepository: Send + Sync {
    /// Read deal rows from a file, picking the format by extension
    /// (`.csv` → CSV, anything else → workbook).
    async fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path> + Send;

    fn from_xlsx_bytes(&self, bytes: &[u8]) -> Result<Vec<DealRowSpec>, DealSheetError>;

    fn from_csv_string(&self, s: &str) -> Result<Vec<DealRowSpec>, DealSheetError>;
}
