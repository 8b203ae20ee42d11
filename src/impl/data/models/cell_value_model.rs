use calamine::Data;

use crate::domain::entities::cell_value::CellValue;

// Boundary coercion: whatever shape the file format hands us becomes a
// `CellValue` before it enters the domain.

pub(crate) fn from_xlsx_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => from_text(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => from_text(s),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

pub(crate) fn from_csv_field(field: &str) -> CellValue {
    from_text(field)
}

fn from_text(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_cells_map_to_their_variant() {
        assert_eq!(from_xlsx_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(from_xlsx_cell(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            from_xlsx_cell(&Data::String("  €50 ".into())),
            CellValue::Text("€50".into())
        );
        assert_eq!(from_xlsx_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn blank_text_becomes_empty() {
        assert_eq!(from_csv_field("   "), CellValue::Empty);
        assert_eq!(from_csv_field("x"), CellValue::Text("x".into()));
    }
}
