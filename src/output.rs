// Console rendering and file exports.
use crate::error::Result;
use crate::util::format_millions;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

const BAR_WIDTH: usize = 40;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_table(rows, max_rows));
    if rows.len() > max_rows {
        println!("({} more rows not shown)", rows.len() - max_rows);
    }
    println!();
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

/// Horizontal bars scaled to the largest value, labelled in millions.
pub fn render_bar_chart(title: &str, bars: &[(String, f64)], unit: &str) -> String {
    let mut out = format!("{}\n", title);
    if bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    for (label, value) in bars {
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "{}{} | {} {} {}\n",
            label,
            " ".repeat(pad),
            "█".repeat(bar_len(*value, max)),
            format_millions(*value),
            unit
        ));
    }
    out
}

/// Yearly series as a sparkline followed by one labelled bar per year.
pub fn render_line_chart(title: &str, points: &[(i32, f64)], unit: &str) -> String {
    let mut out = format!("{}\n", title);
    if points.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }
    out.push_str(&sparkline(points.iter().map(|(_, v)| *v)));
    out.push('\n');
    let bars: Vec<(String, f64)> = points.iter().map(|(y, v)| (y.to_string(), *v)).collect();
    for line in render_bar_chart("", &bars, unit).lines().skip(1) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn sparkline(values: impl Iterator<Item = f64> + Clone) -> String {
    let max = values.clone().fold(0.0, f64::max);
    values
        .map(|v| {
            if max <= 0.0 || v <= 0.0 {
                SPARKS[0]
            } else {
                let idx = ((v / max) * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[idx.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YearRow;

    #[test]
    fn bar_chart_scales_to_largest_value() {
        let chart = render_bar_chart(
            "Top importers",
            &[("Paraguai".to_string(), 42_000_000.0), ("China".to_string(), 21_000_000.0)],
            "million US$",
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Top importers");
        assert_eq!(lines[1].matches('█').count(), 40);
        assert_eq!(lines[2].matches('█').count(), 20);
        assert!(lines[1].ends_with("42,00 million US$"));
        assert!(lines[2].starts_with("China    |"));
    }

    #[test]
    fn line_chart_has_sparkline_and_one_row_per_year() {
        let chart = render_line_chart("Quantity", &[(2009, 0.0), (2010, 7.0), (2011, 14.0)], "ML");
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "▁▅█");
        assert!(lines[2].starts_with("2009 |"));
    }

    #[test]
    fn empty_inputs_render_placeholders() {
        assert!(render_bar_chart("t", &[], "u").contains("(no data)"));
        assert_eq!(render_table::<YearRow>(&[], 5), "(no rows)");
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("years.csv");
        let rows = vec![YearRow {
            year: 2009,
            quantity: "1.000".to_string(),
            value: "US$ 10,00".to_string(),
        }];
        write_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Year,Quantity,Value\n2009,1.000,\"US$ 10,00\"\n");
    }
}
