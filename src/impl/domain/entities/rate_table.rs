use std::collections::HashMap;

use iso_currency::Currency;

/// Exchange rates against EUR, keyed by currency code. A rate is "units of
/// that currency per 1 EUR", so `amount / rate` converts into EUR.
///
/// Fetched once per conversion run and immutable afterwards; always passed
/// by reference into the normalization logic, never held as process state.
#[derive(Debug, Clone, Default)]
pub struct RateTable(HashMap<Currency, f64>);

impl RateTable {
    pub fn new(rates: HashMap<Currency, f64>) -> Self {
        Self(rates)
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.0.get(&currency).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Currency, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (Currency, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_currency() {
        let table: RateTable = [(Currency::USD, 1.1), (Currency::GBP, 0.85)]
            .into_iter()
            .collect();
        assert_eq!(table.rate(Currency::USD), Some(1.1));
        assert_eq!(table.rate(Currency::JPY), None);
        assert_eq!(table.len(), 2);
    }
}
