use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::{
    data::{
        datasources::rates_api_datasource::{
            RatesApiDatasourceImpl, RatesDatasource, StaticRatesDatasource,
        },
        repositories::records_repository_impl::RecordsRepositoryImpl,
    },
    domain::{
        entities::{
            deal_row::{DealRecord, DealRowSpec},
            rate_table::RateTable,
            report::ConversionReport,
        },
        logic::row_mapper::RowMapper,
        repositories::records_repository::RecordsRepository,
    },
    errors::DealSheetError,
};

#[async_trait]
pub trait ConvertUsecase: Send + Sync {
    async fn from_file<P>(
        &self,
        path: P,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError>
    where
        P: AsRef<Path> + Send;

    async fn from_xlsx_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError>;

    async fn from_csv_string(
        &self,
        s: &str,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError>;
}

pub(crate) struct ConvertUsecaseImpl<
    R2,
    R1 = RecordsRepositoryImpl, // Default.
> where
    R1: RecordsRepository,
    R2: RatesDatasource,
{
    records_repository: R1,
    rates_datasource: R2,
}

#[async_trait]
impl<R2, R1> ConvertUsecase for ConvertUsecaseImpl<R2, R1>
where
    R1: RecordsRepository,
    R2: RatesDatasource,
{
    async fn from_file<P>(
        &self,
        path: P,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError>
    where
        P: AsRef<Path> + Send,
    {
        let specs = self.records_repository.from_file(path).await?;
        self.map_rows(specs).await
    }

    async fn from_xlsx_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError> {
        let specs = self.records_repository.from_xlsx_bytes(bytes)?;
        self.map_rows(specs).await
    }

    async fn from_csv_string(
        &self,
        s: &str,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError> {
        let specs = self.records_repository.from_csv_string(s)?;
        self.map_rows(specs).await
    }
}

impl<R2, R1> ConvertUsecaseImpl<R2, R1>
where
    R1: RecordsRepository,
    R2: RatesDatasource,
{
    /// One rate fetch, then a sequential pass over the rows. The table is
    /// read-only from here on.
    async fn map_rows(
        &self,
        specs: Vec<DealRowSpec>,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError> {
        let rates = self.rates_datasource.fetch().await?;
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();
        let records: Vec<DealRecord> = specs
            .iter()
            .map(|spec| mapper.map_row(spec, &mut report))
            .collect();
        info!(
            rows = records.len(),
            warnings = report.warnings.len(),
            "mapped input rows"
        );
        Ok((records, report))
    }
}

impl ConvertUsecaseImpl<RatesApiDatasourceImpl> {
    pub(crate) fn new() -> Self {
        ConvertUsecaseImpl {
            records_repository: RecordsRepositoryImpl::new(),
            rates_datasource: RatesApiDatasourceImpl::new(),
        }
    }
}

impl ConvertUsecaseImpl<StaticRatesDatasource> {
    pub(crate) fn with_rate_table(table: RateTable) -> Self {
        ConvertUsecaseImpl {
            records_repository: RecordsRepositoryImpl::new(),
            rates_datasource: StaticRatesDatasource::new(table),
        }
    }
}
