//! Pipe-delimited text tables.

use polars::prelude::*;

/// Render a cell for display.
///
/// Nulls become empty cells; floats are shown at four decimals; strings
/// are shown bare.
pub(crate) fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format!("{v:.4}"),
        AnyValue::Float32(v) => format!("{v:.4}"),
        other => other.to_string(),
    }
}

/// Render a frame as a pipe-delimited table with a header row.
///
/// Columns are padded to their widest cell, the header is separated by a
/// dash row, and null cells render empty:
///
/// ```text
/// | Asset | Simple | Log     |
/// |-------|--------|---------|
/// | AMZN  | 1.2000 |         |
/// ```
pub fn render_pipe_table(frame: &DataFrame) -> String {
    let columns = frame.get_columns();

    let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let row = columns
            .iter()
            .map(|c| cell_text(&c.get(i).unwrap_or(AnyValue::Null)))
            .collect();
        rows.push(row);
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let mut output = String::new();
    push_row(&mut output, &headers, &widths);

    output.push('|');
    for width in &widths {
        output.push_str(&"-".repeat(width + 2));
        output.push('|');
    }
    output.push('\n');

    for row in &rows {
        push_row(&mut output, row, &widths);
    }

    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    output.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        output.push_str(&format!(" {cell:<width$} |"));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Asset".into(), vec!["AMZN", "KO"]).into(),
            Series::new("Sharpe".into(), vec![Some(1.25), None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_header_and_separator() {
        let table = render_pipe_table(&frame());
        let mut lines = table.lines();

        assert_eq!(lines.next().unwrap(), "| Asset | Sharpe |");
        assert_eq!(lines.next().unwrap(), "|-------|--------|");
    }

    #[test]
    fn test_null_renders_empty() {
        let table = render_pipe_table(&frame());
        let ko_line = table.lines().find(|l| l.contains("KO")).unwrap();

        assert_eq!(ko_line, "| KO    |        |");
    }

    #[test]
    fn test_floats_at_four_decimals() {
        let table = render_pipe_table(&frame());
        assert!(table.contains("1.2500"));
    }

    #[test]
    fn test_empty_frame_renders_header_only() {
        let empty = DataFrame::new(vec![
            Series::new("Asset".into(), Vec::<String>::new()).into(),
        ])
        .unwrap();

        let table = render_pipe_table(&empty);
        assert_eq!(table.lines().count(), 2);
    }
}
