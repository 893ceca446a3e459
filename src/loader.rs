// Sheet acquisition: read each configured export, reject non-CSV bodies,
// and turn everything into typed collections in one pass.
use crate::alerts::derive_alerts;
use crate::config::{AppConfig, Sheet};
use crate::error::{FlotaError, Result};
use crate::expirations::{
    derive_expirations, resolve_system_date, system_date_from_grid, ExpirationSheet,
};
use crate::grid::parse_grid;
use crate::mapper::{map_fleet, map_insumos, map_pending, map_personnel, map_rubros, map_units};
use crate::types::{
    FleetUnit, Insumo, MaintenanceAlert, PendingTask, Personnel, RawGrid, Rubro, Unit,
    UnitExpiration,
};
use chrono::NaiveDate;

/// Published sheets answer with an HTML login page when sharing is off.
fn looks_like_html(text: &str) -> bool {
    text.contains("<!DOCTYPE html>")
}

/// Check that an export body is usable CSV and parse it.
pub fn grid_from_text(sheet: Sheet, text: &str) -> Result<RawGrid> {
    if text.trim().is_empty() {
        return Err(FlotaError::EmptySheet(sheet.name()));
    }
    if looks_like_html(text) {
        return Err(FlotaError::NotCsv(sheet.name()));
    }
    Ok(parse_grid(text))
}

pub fn load_sheet(config: &AppConfig, sheet: Sheet) -> Result<RawGrid> {
    let path = config.sheet_path(sheet);
    let text = std::fs::read_to_string(&path).map_err(|source| FlotaError::SourceRead {
        sheet: sheet.name(),
        path: path.clone(),
        source,
    })?;
    let grid = grid_from_text(sheet, &text)?;
    tracing::debug!(sheet = sheet.name(), path = %path.display(), rows = grid.len(), "loaded sheet");
    Ok(grid)
}

/// Like `load_sheet`, but a failed sheet is logged and treated as having
/// no rows so the rest of the workshop data still loads.
fn load_or_empty(config: &AppConfig, sheet: Sheet, report: &mut LoadReport) -> RawGrid {
    match load_sheet(config, sheet) {
        Ok(g) => {
            report.sheets_loaded += 1;
            g
        }
        Err(e) => {
            tracing::warn!(sheet = sheet.name(), error = %e, "sheet unavailable");
            report.failed_sheets.push(sheet.name());
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub sheets_loaded: usize,
    pub failed_sheets: Vec<&'static str>,
    pub system_date_from_sheet: bool,
}

/// Everything the boards and pickers work from, as of `system_date`.
#[derive(Debug, Clone)]
pub struct FleetData {
    pub system_date: NaiveDate,
    pub units: Vec<Unit>,
    pub fleet: Vec<FleetUnit>,
    pub pending: Vec<PendingTask>,
    pub personnel: Vec<Personnel>,
    pub rubros: Vec<Rubro>,
    pub insumos: Vec<Insumo>,
    pub alerts: Vec<MaintenanceAlert>,
    pub unit_expirations: Vec<UnitExpiration>,
    pub personnel_expirations: Vec<UnitExpiration>,
}

/// Load every sheet. The system date is read once and shared by both
/// expiration sheets; `fallback_date` is used when the state sheet has none.
pub fn load_all(config: &AppConfig, fallback_date: NaiveDate) -> (FleetData, LoadReport) {
    let mut report = LoadReport::default();

    let state = load_or_empty(config, Sheet::SystemState, &mut report);
    let system_date = resolve_system_date(Some(&state), fallback_date);
    report.system_date_from_sheet = system_date_from_grid(&state).is_some();

    let data = FleetData {
        system_date,
        units: map_units(&load_or_empty(config, Sheet::Units, &mut report)),
        fleet: map_fleet(&load_or_empty(config, Sheet::Fleet, &mut report)),
        pending: map_pending(&load_or_empty(config, Sheet::Pending, &mut report)),
        personnel: map_personnel(&load_or_empty(config, Sheet::Personnel, &mut report)),
        rubros: map_rubros(&load_or_empty(config, Sheet::Rubros, &mut report)),
        insumos: map_insumos(&load_or_empty(config, Sheet::Insumos, &mut report)),
        alerts: derive_alerts(&load_or_empty(config, Sheet::Alerts, &mut report)),
        unit_expirations: derive_expirations(
            &load_or_empty(config, Sheet::UnitExpirations, &mut report),
            system_date,
            ExpirationSheet::Units,
        ),
        personnel_expirations: derive_expirations(
            &load_or_empty(config, Sheet::PersonnelExpirations, &mut report),
            system_date,
            ExpirationSheet::Personnel,
        ),
    };
    (data, report)
}
