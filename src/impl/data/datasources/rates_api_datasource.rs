use std::collections::HashMap;

use async_trait::async_trait;
use iso_currency::Currency;
use serde_derive::Deserialize;
use tracing::info;

use crate::{domain::entities::rate_table::RateTable, errors::DealSheetError};

/// Public endpoint serving the current EUR-base rate table.
const RATES_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/EUR";

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Source of the exchange-rate table. Fetched exactly once per conversion
/// run; a failure here is fatal for the run since every conversion depends
/// on the table.
#[async_trait]
pub trait RatesDatasource: Send + Sync {
    async fn fetch(&self) -> Result<RateTable, DealSheetError>;
}

pub struct RatesApiDatasourceImpl {
    client: reqwest::Client,
    url: String,
}

impl RatesApiDatasourceImpl {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: RATES_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl RatesDatasource for RatesApiDatasourceImpl {
    async fn fetch(&self) -> Result<RateTable, DealSheetError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let body: RatesResponse =
            response
                .json()
                .await
                .map_err(|e| DealSheetError::InvalidRateResponse {
                    details: e.to_string(),
                })?;
        let table = table_from_rates(body.rates)?;
        info!(currencies = table.len(), "fetched exchange rates");
        Ok(table)
    }
}

/// A fixed table injected at construction time. Used for offline and
/// deterministic runs; never touches the network.
pub struct StaticRatesDatasource {
    table: RateTable,
}

impl StaticRatesDatasource {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl RatesDatasource for StaticRatesDatasource {
    async fn fetch(&self) -> Result<RateTable, DealSheetError> {
        Ok(self.table.clone())
    }
}

/// Build the rate table from the response map. Codes that are not valid
/// ISO 4217, and non-positive rates, are skipped; a response with nothing
/// usable left is treated as malformed.
fn table_from_rates(rates: HashMap<String, f64>) -> Result<RateTable, DealSheetError> {
    let table: RateTable = rates
        .into_iter()
        .filter(|(_, rate)| *rate > 0.0)
        .filter_map(|(code, rate)| Currency::from_code(&code).map(|c| (c, rate)))
        .collect();
    if table.is_empty() {
        return Err(DealSheetError::InvalidRateResponse {
            details: "no usable rates in response".to_string(),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape_decodes() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"rates": {"USD": 1.1, "GBP": 0.85}}"#).unwrap();
        let table = table_from_rates(body.rates).unwrap();
        assert_eq!(table.rate(Currency::USD), Some(1.1));
        assert_eq!(table.rate(Currency::GBP), Some(0.85));
    }

    #[test]
    fn unknown_codes_and_bad_rates_are_skipped() {
        let rates = HashMap::from([
            ("USD".to_string(), 1.1),
            ("???".to_string(), 2.0),
            ("GBP".to_string(), 0.0),
        ]);
        let table = table_from_rates(rates).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rate(Currency::GBP), None);
    }

    #[test]
    fn all_unusable_is_malformed() {
        let rates = HashMap::from([("???".to_string(), 1.0)]);
        assert!(matches!(
            table_from_rates(rates),
            Err(DealSheetError::InvalidRateResponse { .. })
        ));
    }

    #[tokio::test]
    async fn static_datasource_returns_injected_table() {
        let table: RateTable = [(Currency::USD, 1.1)].into_iter().collect();
        let fetched = StaticRatesDatasource::new(table).fetch().await.unwrap();
        assert_eq!(fetched.rate(Currency::USD), Some(1.1));
    }
}
