// Delimited-text parser for published sheet exports.
//
// Exports arrive either comma- or semicolon-separated depending on the
// sheet locale. Quoting is not honoured: a delimiter inside quotes still
// splits the cell, and only one wrapping quote on each side is removed.
use crate::types::RawGrid;
use csv::{ReaderBuilder, Trim};

const BOM: char = '\u{FEFF}';

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Pick `;` when the header line has more semicolons than commas.
pub fn detect_delimiter(first_line: &str) -> u8 {
    let commas = first_line.matches(',').count();
    let semis = first_line.matches(';').count();
    if semis > commas {
        b';'
    } else {
        b','
    }
}

fn clean_cell(raw: &str) -> String {
    let t = raw.trim_matches(is_blank);
    let t = t.strip_prefix('"').unwrap_or(t);
    let t = t.strip_suffix('"').unwrap_or(t);
    t.replace(BOM, "")
}

/// Parse exported sheet text into a grid of trimmed cells.
///
/// Never fails: empty input gives an empty grid, unreadable records are
/// logged and dropped.
pub fn parse_grid(text: &str) -> RawGrid {
    // `\r\n`, `\n` and `\r` all end a line.
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .map(|l| l.trim_matches(is_blank))
        .filter(|l| !l.is_empty())
        .collect();
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let delimiter = detect_delimiter(first);
    let normalized = lines.join("\n");

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(normalized.as_bytes());

    let mut grid: RawGrid = Vec::with_capacity(lines.len());
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable sheet record");
                continue;
            }
        };
        grid.push(record.iter().map(clean_cell).collect());
    }
    let sep = delimiter as char;
    tracing::debug!(rows = grid.len(), delimiter = %sep, "parsed sheet grid");
    grid
}
