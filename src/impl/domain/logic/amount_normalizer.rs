use iso_currency::Currency;

use crate::{
    domain::entities::rate_table::RateTable,
    errors::InvalidAmount,
};

/// Outcome of normalizing one amount cell. Carries the EUR value together
/// with an optional diagnostic, so the row mapper decides the degrade-vs-abort
/// policy instead of a catch block deciding it implicitly.
#[derive(Debug, PartialEq)]
pub(crate) struct NormalizedAmount {
    pub(crate) eur: f64,
    pub(crate) warning: Option<String>,
}

impl NormalizedAmount {
    fn clean(eur: f64) -> Self {
        Self { eur, warning: None }
    }

    fn degraded(eur: f64, warning: String) -> Self {
        Self {
            eur,
            warning: Some(warning),
        }
    }
}

/// Convert a raw amount cell into EUR.
///
/// Currency detection is marker-based, first match wins: `£` → GBP, then
/// `USD$`/`$`/`USD` → USD, then `€` → EUR, then `GBP` → GBP, default EUR.
/// The numeric part is whatever survives stripping everything but digits and
/// the decimal point; that removes thousands separators, but also minus
/// signs, so negative amounts come out as positive magnitudes (inherited
/// behavior, documented in the tests below).
///
/// EUR amounts are returned as-is without consulting the table. A detected
/// currency missing from the table degrades to the unconverted amount with a
/// warning; an unparseable cell degrades to `0.0` with a warning.
pub(crate) fn to_eur(raw: &str, rates: &RateTable) -> NormalizedAmount {
    let currency = detect_currency(raw);
    let amount = match parse_amount(raw) {
        Ok(v) => v,
        Err(e) => return NormalizedAmount::degraded(0.0, e.to_string()),
    };

    if currency == Currency::EUR {
        return NormalizedAmount::clean(amount);
    }

    match rates.rate(currency) {
        Some(rate) => NormalizedAmount::clean(amount / rate),
        None => NormalizedAmount::degraded(
            amount,
            format!("exchange rate not found for {}", currency.code()),
        ),
    }
}

fn detect_currency(raw: &str) -> Currency {
    if raw.contains('£') {
        Currency::GBP
    } else if raw.contains("USD$") || raw.contains('$') || raw.contains("USD") {
        Currency::USD
    } else if raw.contains('€') {
        Currency::EUR
    } else if raw.contains("GBP") {
        Currency::GBP
    } else {
        Currency::EUR
    }
}

fn parse_amount(raw: &str) -> Result<f64, InvalidAmount> {
    let numeric_part: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric_part.parse::<f64>().map_err(|_| InvalidAmount {
        value: raw.to_string(),
    })
}
