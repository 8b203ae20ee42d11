use std::fmt;

use crate::domain::entities::report::{CellWarning, ConversionReport};

impl fmt::Display for CellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} [{}]: {}", self.row, self.column, self.message)
    }
}

impl ConversionReport {
    /// Operator-facing rendering, one line per degraded cell.
    pub fn render_lines(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_lines_name_row_and_column() {
        let mut report = ConversionReport::default();
        report.push(CellWarning {
            row: 12,
            column: "Amount",
            message: "exchange rate not found for CHF".into(),
        });
        assert_eq!(
            report.render_lines(),
            vec!["row 12 [Amount]: exchange rate not found for CHF"]
        );
    }
}
