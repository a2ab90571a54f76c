use orgfetch_core::CompanyRecord;

const NULL_CELL: &str = "\u{2014}";

/// Renders the record as a boxed one-row table, one column per field.
///
/// Null values are shown as an em dash.
#[must_use]
pub fn render_preview(record: &CompanyRecord) -> String {
    let cells: Vec<&str> = record
        .values()
        .iter()
        .map(|v| v.unwrap_or(NULL_CELL))
        .collect();
    let widths: Vec<usize> = CompanyRecord::COLUMNS
        .iter()
        .zip(&cells)
        .map(|(name, cell)| name.chars().count().max(cell.chars().count()))
        .collect();

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };
    let row = |values: &[&str]| {
        let mut line = String::from("|");
        for (value, width) in values.iter().zip(&widths) {
            let pad = width - value.chars().count();
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    [
        border.clone(),
        row(CompanyRecord::COLUMNS.as_slice()),
        border.clone(),
        row(cells.as_slice()),
        border,
    ]
    .join("\n")
}
