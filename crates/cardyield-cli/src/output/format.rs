use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, or one labelled block per row when the table
/// would not fit in `max_width`.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let needed = INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    if needed > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();

    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, value.chars().count());
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, &width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(" ".repeat(COLUMN_GAP).as_str()))
        .trim_end()
        .to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {label:<label_width$}  {value}"));
        }
    }

    output
}

/// Whole-unit amount with thousands separators, e.g. `1,234,567`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_rate(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_points(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format_amount(value)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Align, Column, format_amount, format_points, format_rate, key_value_rows,
        render_table_or_blocks,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Total:", "100".to_string()),
                ("Uncategorized:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Total:          100");
        assert_eq!(rows[1], "  Uncategorized:  0");
    }

    #[test]
    fn table_renderer_aligns_numeric_columns_right() {
        let columns = [
            Column {
                name: "Card",
                align: Align::Left,
            },
            Column {
                name: "Net",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["flat-one".to_string(), "10,000".to_string()],
            vec!["x".to_string(), "5".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 80, "Card");
        assert_eq!(rendered[0], "  Card         Net");
        assert_eq!(rendered[1], "  flat-one  10,000");
        assert_eq!(rendered[2], "  x              5");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column {
                name: "Card",
                align: Align::Left,
            },
            Column {
                name: "Net return",
                align: Align::Right,
            },
        ];
        let rows = vec![vec![
            "a-card-with-a-very-long-identifier".to_string(),
            "12,345".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 40, "Result");
        assert_eq!(rendered[0], "  Result 1:");
        assert!(rendered[1].contains("Card:"));
        assert!(rendered[2].contains("Net return:"));
    }

    #[test]
    fn amounts_are_grouped_and_rounded() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.4), "999");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(-5_500.0), "-5,500");
        assert_eq!(format_rate(1.234), "1.23%");
        assert_eq!(format_points(12_000.0), "12,000");
        assert_eq!(format_points(12.34), "12.3");
    }
}
