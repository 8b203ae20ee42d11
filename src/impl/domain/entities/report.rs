/// A recoverable per-cell degradation. The offending cell was substituted
/// with a sentinel or left unconverted; the batch kept going.
#[derive(Debug, Clone, PartialEq)]
pub struct CellWarning {
    /// 1-based row number in the source sheet (header is row 1).
    pub row: usize,
    /// Input column the warning refers to.
    pub column: &'static str,
    pub message: String,
}

/// Diagnostics collected over one conversion run. Warnings are ordered by
/// source row; a clean run carries none.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    pub warnings: Vec<CellWarning>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn push(&mut self, warning: CellWarning) {
        self.warnings.push(warning);
    }
}
