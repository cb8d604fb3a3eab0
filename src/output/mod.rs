//! Output formatting for pod listings

use crate::resources::{KubeResource, StatusCategory, Tabular};
use owo_colors::OwoColorize;

/// Format a list of resources as a table
pub fn format_table<T: Tabular>(resources: &[T], wide: bool) -> String {
    if resources.is_empty() {
        return "No resources found".to_string();
    }

    let headers: Vec<&str> = if wide {
        T::headers_wide()
    } else {
        T::headers()
    };

    let rows: Vec<Vec<String>> = resources
        .iter()
        .map(|r| {
            let row = if wide { r.row_wide() } else { r.row() };
            match r.status_for_color() {
                Some(status) => row
                    .into_iter()
                    .map(|cell| {
                        if cell == status {
                            colorize_status(&cell)
                        } else {
                            cell
                        }
                    })
                    .collect(),
                None => row,
            }
        })
        .collect();

    format_table_raw(&headers, &rows)
}

/// Format raw headers and rows as a table
pub fn format_table_raw(headers: &[&str], rows: &[Vec<String>]) -> String {
    let num_cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            widths[i] = widths[i].max(visible_len(cell));
        }
    }

    let header_line = pad_cells(headers.iter().copied(), &widths);
    let mut output = header_line.bold().to_string();
    output.push('\n');

    for row in rows {
        output.push_str(&pad_cells(row.iter().map(String::as_str), &widths));
        output.push('\n');
    }

    output.trim_end().to_string()
}

fn pad_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(visible_len(cell)) + 2));
    }
    line.trim_end().to_string()
}

/// Length of a cell without ANSI escape codes
fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;

    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else {
            len += 1;
        }
    }

    len
}

/// Colorize a status string based on its category
pub fn colorize_status(status: &str) -> String {
    match StatusCategory::of(status) {
        StatusCategory::Healthy => status.green().to_string(),
        StatusCategory::Warning => status.yellow().to_string(),
        StatusCategory::Error => status.red().to_string(),
        StatusCategory::Unknown => status.to_string(),
    }
}

/// Format resources as JSON
pub fn format_json<T: serde::Serialize>(resources: &[T], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(resources)
    } else {
        serde_json::to_string(resources)
    }
}

/// Format resources as YAML
pub fn format_yaml<T: serde::Serialize>(resources: &[T]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(resources)
}

/// Format as `namespace/name` lines
pub fn format_names<T: KubeResource>(resources: &[T]) -> String {
    resources
        .iter()
        .map(|r| match r.namespace() {
            Some(ns) => format!("{}/{}", ns, r.name()),
            None => r.name().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_len_ignores_ansi() {
        assert_eq!(visible_len("Running"), 7);
        assert_eq!(visible_len(&"Running".green().to_string()), 7);
    }

    #[test]
    fn test_table_columns_align() {
        let table = format_table_raw(
            &["NAME", "STATUS"],
            &[
                vec!["api-0".to_string(), "Running".to_string()],
                vec!["worker-long-name".to_string(), "Pending".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].find("Running"), lines[2].find("Pending"));
    }
}
