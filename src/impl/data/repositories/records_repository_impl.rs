use std::path::Path;

use async_trait::async_trait;

use crate::{
    data::datasources::{
        deals_csv_datasource::{DealsCsvDatasource, DealsCsvDatasourceImpl},
        deals_xlsx_datasource::{DealsXlsxDatasource, DealsXlsxDatasourceImpl},
    },
    domain::{entities::deal_row::DealRowSpec, repositories::records_repository::RecordsRepository},
    errors::DealSheetError,
};

pub(crate) struct RecordsRepositoryImpl<
    DS1 = DealsXlsxDatasourceImpl, // Default.
    DS2 = DealsCsvDatasourceImpl,  // Default.
> where
    DS1: DealsXlsxDatasource + Send + Sync,
    DS2: DealsCsvDatasource,
{
    xlsx_datasource: DS1,
    csv_datasource: DS2,
}

#[async_trait]
impl<DS1, DS2> RecordsRepository for RecordsRepositoryImpl<DS1, DS2>
where
    DS1: DealsXlsxDatasource + Send + Sync,
    DS2: DealsCsvDatasource,
{
    async fn from_file<P>(&self, path: P) -> Result<Vec<DealRowSpec>, DealSheetError>
    where
        P: AsRef<Path> + Send,
    {
        let is_csv = path
            .as_ref()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            self.csv_datasource.from_file(path).await
        } else {
            self.xlsx_datasource.from_file(path)
        }
    }

    fn from_xlsx_bytes(&self, bytes: &[u8]) -> Result<Vec<DealRowSpec>, DealSheetError> {
        self.xlsx_datasource.from_bytes(bytes)
    }

    fn from_csv_string(&self, s: &str) -> Result<Vec<DealRowSpec>, DealSheetError> {
        self.csv_datasource.from_string(s)
    }
}

impl RecordsRepositoryImpl<DealsXlsxDatasourceImpl, DealsCsvDatasourceImpl> {
    pub(crate) fn new() -> Self {
        RecordsRepositoryImpl {
            xlsx_datasource: DealsXlsxDatasourceImpl::new(),
            csv_datasource: DealsCsvDatasourceImpl::new(),
        }
    }
}
