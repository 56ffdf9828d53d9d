use serde::Serialize;
use tracing::debug;

/// A rectangular table recovered from markdown-style pipe text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTable {
    /// Column names from the first non-separator pipe row, trimmed.
    /// Duplicate names carry a positional suffix, e.g. `"עלות (2)"`.
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells, trimmed.
    pub rows: Vec<Vec<String>>,
}

/// Borrowed view of one row as a header → cell mapping.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRow<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> ParsedRow<'a> {
    /// Cell value under `header`, or `None` if the table has no such column.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.cells[i].as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers
            .iter()
            .zip(self.cells.iter())
            .map(|(h, c)| (h.as_str(), c.as_str()))
    }
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn row(&self, index: usize) -> Option<ParsedRow<'_>> {
        self.rows.get(index).map(|cells| ParsedRow {
            headers: &self.headers,
            cells,
        })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = ParsedRow<'_>> {
        self.rows.iter().map(|cells| ParsedRow {
            headers: &self.headers,
            cells,
        })
    }

    /// Serialize back to a markdown pipe table.
    ///
    /// `parse_table(t.to_markdown())` reproduces `t` as long as cells contain
    /// no `|` or newline (both would have been split apart on the way in).
    pub fn to_markdown(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        push_row(&mut out, &self.headers);
        out.push('|');
        for _ in &self.headers {
            out.push_str("---|");
        }
        out.push('\n');
        for row in &self.rows {
            push_row(&mut out, row);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}

/// Extract the first pipe table found in `raw`.
///
/// The input is LLM output: prose lines, separator lines and ragged rows may
/// all be present. Anything unusable is dropped silently; the worst case is an
/// empty table, never an error.
pub fn parse_table(raw: &str) -> ParsedTable {
    let mut dropped_prose = 0usize;
    let mut separators = 0usize;
    let mut table_lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if !line.contains('|') {
            dropped_prose += 1;
            continue;
        }
        if is_separator_line(line) {
            separators += 1;
            continue;
        }
        table_lines.push(line);
    }

    let mut lines = table_lines.into_iter();
    let headers = match lines.next() {
        Some(line) => dedup_headers(split_row(line)),
        None => {
            debug!(dropped_prose, "no pipe rows in input");
            return ParsedTable::default();
        }
    };
    if headers.is_empty() {
        // Header line held nothing but pipes; there is no column set to map to.
        return ParsedTable::default();
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in lines {
        let mut cells = split_row(line);
        // Pad at the end / truncate so cells never misalign with headers.
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    // Some responses echo the header row again as the first data row.
    if let Some(first) = rows.first() {
        if !headers[0].is_empty() && first[0].contains(headers[0].as_str()) {
            rows.remove(0);
        }
    }

    debug!(
        dropped_prose,
        separators,
        rows = rows.len(),
        "extracted pipe table"
    );

    ParsedTable { headers, rows }
}

/// `|---|:---:|` style rows: only `-`, `:`, `|` and whitespace.
fn is_separator_line(line: &str) -> bool {
    let mut saw_dash = false;
    for c in line.chars() {
        match c {
            '|' => {}
            '-' | ':' => saw_dash = true,
            c if c.is_whitespace() => {}
            _ => return false,
        }
    }
    saw_dash
}

/// Split on `|`, trim each field, and drop the empty leading/trailing fields
/// produced by outer pipes. Interior empty cells are kept.
fn split_row(line: &str) -> Vec<String> {
    let mut fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.first() == Some(&"") {
        fields.remove(0);
    }
    if fields.last() == Some(&"") {
        fields.pop();
    }
    fields.into_iter().map(str::to_string).collect()
}

/// Later occurrences of a repeated header get a positional suffix so no
/// column silently shadows another.
fn dedup_headers(fields: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(fields.len());
    for name in fields {
        if !out.contains(&name) {
            out.push(name);
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{} ({})", name, n);
            if !out.contains(&candidate) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}
