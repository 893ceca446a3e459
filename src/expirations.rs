// Document-expiration status for units and drivers.
//
// Each data row is one holder; each document column holds a `dd/mm/yyyy`
// expiry date. Days left are counted against a single reference date for
// the whole load so every row is judged "as of" the same day.
use crate::types::{cell, ExpirationItem, RawGrid, Status, UnitExpiration};
use crate::util::{days_between, parse_dmy_date};
use chrono::{Local, NaiveDate};

pub const DEFAULT_WARNING_DAYS: i64 = 30;
pub const FUMIGATION_WARNING_DAYS: i64 = 8;

/// Driver-sheet columns that never hold document dates.
pub const PERSONNEL_RESERVED_COLUMNS: [usize; 3] = [6, 7, 8];

const FUMIGATION_MARKERS: [&str; 2] = ["fumigacion", "fumigación"];

/// Which sheet layout the grid follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationSheet {
    /// Unit id in column 0, documents from column 1.
    Units,
    /// Driver name in column 1, documents from column 2.
    Personnel,
}

impl ExpirationSheet {
    fn holder_col(self) -> usize {
        match self {
            ExpirationSheet::Units => 0,
            ExpirationSheet::Personnel => 1,
        }
    }

    fn first_document_col(self) -> usize {
        match self {
            ExpirationSheet::Units => 1,
            ExpirationSheet::Personnel => 2,
        }
    }

    fn is_reserved(self, col: usize) -> bool {
        self == ExpirationSheet::Personnel && PERSONNEL_RESERVED_COLUMNS.contains(&col)
    }
}

pub fn is_fumigation(document: &str) -> bool {
    let lower = document.to_lowercase();
    FUMIGATION_MARKERS.iter().any(|m| lower.contains(m))
}

/// Expired or due today is critical. The warning window is 8 days for
/// fumigation certificates and 30 for everything else.
pub fn classify_days(document: &str, days_left: i64) -> Status {
    let window = if is_fumigation(document) {
        FUMIGATION_WARNING_DAYS
    } else {
        DEFAULT_WARNING_DAYS
    };
    if days_left <= 0 {
        Status::Critical
    } else if days_left <= window {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// Administrative columns (notes, the unit column repeated) are not documents.
fn is_admin_header(header: &str) -> bool {
    let lower = header.to_lowercase();
    lower.contains("observaciones") || lower == "unidad" || lower == "unidades"
}

pub fn derive_expirations(
    grid: &RawGrid,
    system_date: NaiveDate,
    sheet: ExpirationSheet,
) -> Vec<UnitExpiration> {
    let Some(headers) = grid.first() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for row in grid.iter().skip(1) {
        let holder = cell(row, sheet.holder_col());
        if holder.trim().is_empty() {
            continue;
        }

        let mut expirations = Vec::new();
        for i in sheet.first_document_col()..row.len() {
            if sheet.is_reserved(i) {
                continue;
            }
            let document = cell(headers, i);
            let value = row[i].as_str();
            if document.is_empty() || value.trim().is_empty() || is_admin_header(document) {
                continue;
            }
            let Some(expiry) = parse_dmy_date(value) else {
                tracing::debug!(holder, document, value, "skipping unreadable expiry date");
                continue;
            };
            let days_left = days_between(system_date, expiry);
            expirations.push(ExpirationItem {
                document: document.to_string(),
                expiry_date: value.to_string(),
                days_left,
                status: classify_days(document, days_left),
            });
        }

        out.push(UnitExpiration {
            unit: holder.to_string(),
            expirations,
        });
    }
    tracing::debug!(holders = out.len(), ?sheet, %system_date, "derived expirations");
    out
}

/// First `dd/mm/yyyy` cell in the system-state sheet, scanning row by row.
pub fn system_date_from_grid(grid: &RawGrid) -> Option<NaiveDate> {
    grid.iter()
        .flatten()
        .filter(|c| c.contains('/'))
        .find_map(|c| parse_dmy_date(c))
}

/// Reference date for a whole load: the sheet's date when it has one,
/// otherwise `fallback`.
pub fn resolve_system_date(grid: Option<&RawGrid>, fallback: NaiveDate) -> NaiveDate {
    match grid.and_then(system_date_from_grid) {
        Some(d) => d,
        None => {
            tracing::info!(%fallback, "no system date in sheet, using fallback");
            fallback
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
