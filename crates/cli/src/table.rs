// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aligned text tables for list commands.

use std::io::Write;

use crate::color;

#[derive(Clone, Copy)]
enum Style {
    Plain,
    Muted,
    Status,
}

pub struct Column {
    title: &'static str,
    style: Style,
}

impl Column {
    pub fn left(title: &'static str) -> Self {
        Self { title, style: Style::Plain }
    }

    pub fn muted(title: &'static str) -> Self {
        Self { title, style: Style::Muted }
    }

    /// Colored by [`color::status`]
    pub fn status(title: &'static str) -> Self {
        Self { title, style: Style::Status }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(col.title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Write the header and rows. Padding is computed before coloring, and
    /// the last column is never padded.
    pub fn render(&self, out: &mut dyn Write) {
        let widths = self.widths();
        let last = self.columns.len().saturating_sub(1);

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| pad(col.title, widths[i], i == last))
            .collect();
        let _ = writeln!(out, "{}", color::header(&header.join("  ")));

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    let padded = pad(cell, widths[i], i == last);
                    match col.style {
                        Style::Plain => padded,
                        Style::Muted => color::muted(&padded),
                        Style::Status => {
                            let trail = padded.len() - padded.trim_end().len();
                            format!("{}{}", color::status(cell), " ".repeat(trail))
                        }
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join("  "));
        }
    }
}

fn pad(text: &str, width: usize, last: bool) -> String {
    if last {
        return text.to_string();
    }
    let fill = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
