use tracing::warn;

use crate::domain::{
    entities::{
        deal_row::{input_columns, DealRecord, DealRowSpec},
        rate_table::RateTable,
        report::{CellWarning, ConversionReport},
    },
    logic::{
        amount_normalizer::to_eur,
        close_date_extractor::{extract_close_date, DATE_MISSING},
    },
};

/// Maps raw input rows into the fixed 10-column output schema. Holds the rate
/// table for the whole run; recoverable cell problems are recorded in the
/// report and never stop the batch.
pub(crate) struct RowMapper<'a> {
    rates: &'a RateTable,
}

impl<'a> RowMapper<'a> {
    pub(crate) fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub(crate) fn map_row(&self, spec: &DealRowSpec, report: &mut ConversionReport) -> DealRecord {
        let amount = self.normalize_amount(spec, report);
        let close_date = self.extract_close_date(spec, report);
        let (deal_name, create_date) = self.derive_date_fields(spec, report);

        DealRecord {
            amount,
            close_date,
            company_name: spec.client.clone(),
            deal_description: spec.service.clone(),
            deal_name,
            deal_owner: spec.owner.clone(),
            // Same conversion as `amount`, computed once.
            forecast_amount: amount,
            create_date,
            invoice_number: spec.invoice_number.clone(),
            bank_account: spec.bank_account.clone(),
        }
    }

    fn normalize_amount(&self, spec: &DealRowSpec, report: &mut ConversionReport) -> f64 {
        let outcome = to_eur(&spec.amount.as_text(), self.rates);
        if let Some(message) = outcome.warning {
            push_warning(report, spec.row, input_columns::AMOUNT, message);
        }
        outcome.eur
    }

    fn extract_close_date(&self, spec: &DealRowSpec, report: &mut ConversionReport) -> String {
        let outcome = extract_close_date(&spec.status.as_text());
        if let Some(message) = outcome.warning {
            push_warning(report, spec.row, input_columns::STATUS, message);
        }
        outcome.value
    }

    /// `Deal Name` and `Create Date` both derive from the `Date` cell. A cell
    /// that cannot be interpreted as a date degrades per-cell like every other
    /// recoverable problem: the deal name falls back to the bare client name,
    /// the create date to the missing-date sentinel, with one warning for the
    /// cell.
    fn derive_date_fields(
        &self,
        spec: &DealRowSpec,
        report: &mut ConversionReport,
    ) -> (String, String) {
        match spec.date.to_datetime() {
            Some(dt) => (
                format!("{} {}", dt.format("%b-%y"), spec.client),
                dt.format("%Y-%m-%d %H:%M").to_string(),
            ),
            None => {
                push_warning(
                    report,
                    spec.row,
                    input_columns::DATE,
                    format!(
                        "could not interpret '{}' as a date; Deal Name and Create Date degraded",
                        spec.date.as_text()
                    ),
                );
                (spec.client.clone(), DATE_MISSING.to_string())
            }
        }
    }
}

fn push_warning(report: &mut ConversionReport, row: usize, column: &'static str, message: String) {
    warn!(row, column, %message, "cell degraded");
    report.push(CellWarning {
        row,
        column,
        message,
    });
}

#[cfg(test)]
mod tests {
    use iso_currency::Currency;

    use super::*;
    use crate::domain::entities::cell_value::CellValue;

    fn spec() -> DealRowSpec {
        DealRowSpec {
            row: 2,
            amount: CellValue::Text("£200".into()),
            status: CellValue::Text("Paid 15/03/2023".into()),
            client: "Acme".into(),
            service: "Consulting".into(),
            date: CellValue::Text("2023-03-01".into()),
            owner: "J. Gestion".into(),
            invoice_number: "INV-77".into(),
            bank_account: "FR76 1234".into(),
        }
    }

    fn table() -> RateTable {
        [(Currency::GBP, 0.85)].into_iter().collect()
    }

    #[test]
    fn maps_a_full_row() {
        let rates = table();
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();
        let record = mapper.map_row(&spec(), &mut report);

        assert!((record.amount - 200.0 / 0.85).abs() < 1e-9);
        assert_eq!(record.close_date, "2023-03-15 05:00");
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.deal_description, "Consulting");
        assert_eq!(record.deal_name, "Mar-23 Acme");
        assert_eq!(record.deal_owner, "J. Gestion");
        assert_eq!(record.create_date, "2023-03-01 00:00");
        assert_eq!(record.invoice_number, "INV-77");
        assert_eq!(record.bank_account, "FR76 1234");
        assert!(report.is_clean());
    }

    #[test]
    fn amount_and_forecast_amount_always_match() {
        let rates = table();
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();

        let mut bad_amount = spec();
        bad_amount.amount = CellValue::Text("n/a".into());
        for s in [spec(), bad_amount] {
            let record = mapper.map_row(&s, &mut report);
            assert_eq!(record.amount, record.forecast_amount);
        }
    }

    #[test]
    fn numeric_amount_cell_is_coerced_to_text_first() {
        let rates = table();
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();

        let mut s = spec();
        s.amount = CellValue::Number(150.0);
        let record = mapper.map_row(&s, &mut report);
        // No marker in "150", so it defaults to EUR.
        assert_eq!(record.amount, 150.0);
        assert!(report.is_clean());
    }

    #[test]
    fn malformed_date_degrades_name_and_create_date() {
        let rates = table();
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();

        let mut s = spec();
        s.date = CellValue::Text("soon".into());
        let record = mapper.map_row(&s, &mut report);

        assert_eq!(record.deal_name, "Acme");
        assert_eq!(record.create_date, DATE_MISSING);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].column, input_columns::DATE);
        assert_eq!(report.warnings[0].row, 2);
    }

    #[test]
    fn date_with_time_of_day_keeps_minutes() {
        let rates = table();
        let mapper = RowMapper::new(&rates);
        let mut report = ConversionReport::default();

        let mut s = spec();
        s.date = CellValue::Text("2023-03-01 14:45:00".into());
        let record = mapper.map_row(&s, &mut report);
        assert_eq!(record.create_date, "2023-03-01 14:45");
    }
}
