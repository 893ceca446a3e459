use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// Rows of trimmed cells as they came out of the sheet export. Row 0 is the
/// header. Rows are not padded, so every lookup has to go through `cell`.
pub type RawGrid = Vec<Vec<String>>;

/// Sentinel used when a sheet leaves a column blank ("sin datos").
pub const NO_DATA: &str = "S/D";

/// Returns the cell at `idx`, or `""` when the row is too short.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Three-level risk classification shared by both status boards.
///
/// Downstream rendering keys its colours off this value only; the raw
/// kilometre and day figures are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Warning,
    Ok,
}

impl Status {
    /// Lower is worse: critical=0, warning=1, ok=2.
    pub fn rank(self) -> u8 {
        match self {
            Status::Critical => 0,
            Status::Warning => 1,
            Status::Ok => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::Warning => "warning",
            Status::Ok => "ok",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertItem {
    pub task: String,
    pub remaining_km: i64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceAlert {
    pub unit: String,
    pub current_km: i64,
    pub items: Vec<AlertItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpirationItem {
    pub document: String,
    /// Cell text exactly as the sheet shows it.
    pub expiry_date: String,
    pub days_left: i64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitExpiration {
    pub unit: String,
    pub expirations: Vec<ExpirationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personnel {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rubro {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insumo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetStatus {
    Activo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetUnit {
    pub id: String,
    pub name: String,
    pub plate: String,
    pub model: String,
    pub year: String,
    pub chassis_number: String,
    pub engine_number: String,
    pub status: FleetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTask {
    pub id: String,
    pub unit: String,
    pub date: String,
    pub priority: String,
    pub description: String,
    pub status: String,
    pub driver: String,
}

// Flattened rows for the markdown previews and CSV exports.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AlertBoardRow {
    #[serde(rename = "Unit")]
    #[tabled(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "CurrentKm")]
    #[tabled(rename = "CurrentKm")]
    pub current_km: String,
    #[serde(rename = "Task")]
    #[tabled(rename = "Task")]
    pub task: String,
    #[serde(rename = "RemainingKm")]
    #[tabled(rename = "RemainingKm")]
    pub remaining_km: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: Status,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ExpirationBoardRow {
    #[serde(rename = "Holder")]
    #[tabled(rename = "Holder")]
    pub holder: String,
    #[serde(rename = "Document")]
    #[tabled(rename = "Document")]
    pub document: String,
    #[serde(rename = "ExpiryDate")]
    #[tabled(rename = "ExpiryDate")]
    pub expiry_date: String,
    #[serde(rename = "DaysLeft")]
    #[tabled(rename = "DaysLeft")]
    pub days_left: i64,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: Status,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct FleetRow {
    #[serde(rename = "Unit")]
    #[tabled(rename = "Unit")]
    pub id: String,
    #[serde(rename = "Plate")]
    #[tabled(rename = "Plate")]
    pub plate: String,
    #[serde(rename = "Model")]
    #[tabled(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub critical: usize,
    pub warning: usize,
    pub ok: usize,
}

#[derive(Debug, Serialize)]
pub struct BoardSummary {
    pub system_date: String,
    pub units_tracked: usize,
    pub units_with_critical: usize,
    pub units_with_warning: usize,
    pub totals: StatusCounts,
}
