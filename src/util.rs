use std::path::Path;

use crate::{
    data::datasources::rates_api_datasource::{
        RatesApiDatasourceImpl, RatesDatasource, StaticRatesDatasource,
    },
    domain::usecases::convert_usecase::{ConvertUsecase as _, ConvertUsecaseImpl},
    entities::{ConversionReport, DealRecord, RateTable},
    errors::DealSheetError,
    presentation::deals_xlsx_printer::DealsXlsxPrinter,
};

/// Facade over the whole pipeline: read a deal sheet, normalize amounts into
/// EUR, derive the calendar fields, and deliver the reshaped 10-column sheet.
///
/// `new()` fetches live exchange rates once per conversion call;
/// `with_rate_table()` runs against an injected table instead (offline,
/// deterministic).
pub struct DealSheetUtil<R = RatesApiDatasourceImpl>
where
    R: RatesDatasource,
{
    convert_usecase: ConvertUsecaseImpl<R>,
    printer: DealsXlsxPrinter,
}

impl DealSheetUtil {
    pub fn new() -> Self {
        Self {
            convert_usecase: ConvertUsecaseImpl::new(),
            printer: DealsXlsxPrinter::new(),
        }
    }
}

impl DealSheetUtil<StaticRatesDatasource> {
    pub fn with_rate_table(table: RateTable) -> Self {
        Self {
            convert_usecase: ConvertUsecaseImpl::with_rate_table(table),
            printer: DealsXlsxPrinter::new(),
        }
    }
}

impl<R> DealSheetUtil<R>
where
    R: RatesDatasource,
{
    /// Convert an input file (`.csv` or workbook) into output records plus
    /// the warnings collected along the way.
    pub async fn from_file<P>(
        &self,
        path: P,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError>
    where
        P: AsRef<Path> + Send,
    {
        self.convert_usecase.from_file(path).await
    }

    pub async fn from_xlsx_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError> {
        self.convert_usecase.from_xlsx_bytes(bytes).await
    }

    pub async fn from_csv_string(
        &self,
        s: &str,
    ) -> Result<(Vec<DealRecord>, ConversionReport), DealSheetError> {
        self.convert_usecase.from_csv_string(s).await
    }

    /// Full pipeline: read `input`, write the reshaped workbook to `output`.
    /// Fatal conditions abort before anything is written.
    pub async fn convert_file<P, Q>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, DealSheetError>
    where
        P: AsRef<Path> + Send,
        Q: AsRef<Path>,
    {
        let (records, report) = self.convert_usecase.from_file(input).await?;
        self.printer.to_file(output, &records)?;
        Ok(report)
    }

    /// In-memory variant for callers that own the upload/download handling:
    /// xlsx bytes in, xlsx bytes out (suggested filename
    /// [`SUGGESTED_FILE_NAME`](crate::delivery::SUGGESTED_FILE_NAME)).
    pub async fn convert_to_buffer(
        &self,
        xlsx_bytes: &[u8],
    ) -> Result<(Vec<u8>, ConversionReport), DealSheetError> {
        let (records, report) = self.convert_usecase.from_xlsx_bytes(xlsx_bytes).await?;
        Ok((self.printer.to_buffer(&records)?, report))
    }
}
