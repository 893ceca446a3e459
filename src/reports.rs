// Flatten ranked board records into table rows, plus a headline summary.
use crate::ranking::RiskRecord;
use crate::types::{
    AlertBoardRow, BoardSummary, ExpirationBoardRow, FleetRow, FleetUnit, MaintenanceAlert,
    Status, StatusCounts, UnitExpiration,
};
use crate::util::format_km;
use chrono::NaiveDate;

/// Items of one record, worst status first. Equal statuses keep sheet
/// column order.
fn worst_first<R: RiskRecord>(record: &R, attention_only: bool) -> Vec<&R::Item> {
    let mut items: Vec<&R::Item> = record
        .items()
        .iter()
        .filter(|i| !attention_only || R::item_status(i) != Status::Ok)
        .collect();
    items.sort_by_key(|i| R::item_status(i).rank());
    items
}

/// One row per task, units in the order given (rank first), tasks within a
/// unit worst first.
///
/// With `attention_only`, ok tasks and units with nothing to act on are
/// left out.
pub fn alert_board_rows(alerts: &[MaintenanceAlert], attention_only: bool) -> Vec<AlertBoardRow> {
    alerts
        .iter()
        .filter(|a| !attention_only || a.needs_attention())
        .flat_map(|a| {
            worst_first(a, attention_only)
                .into_iter()
                .map(move |i| AlertBoardRow {
                    unit: a.unit.clone(),
                    current_km: format_km(a.current_km),
                    task: i.task.clone(),
                    remaining_km: format_km(i.remaining_km),
                    status: i.status,
                })
        })
        .collect()
}

pub fn expiration_board_rows(
    records: &[UnitExpiration],
    attention_only: bool,
) -> Vec<ExpirationBoardRow> {
    records
        .iter()
        .filter(|r| !attention_only || r.needs_attention())
        .flat_map(|r| {
            worst_first(r, attention_only)
                .into_iter()
                .map(move |e| ExpirationBoardRow {
                    holder: r.unit.clone(),
                    document: e.document.clone(),
                    expiry_date: e.expiry_date.clone(),
                    days_left: e.days_left,
                    status: e.status,
                })
        })
        .collect()
}

pub fn fleet_rows(units: &[&FleetUnit]) -> Vec<FleetRow> {
    units
        .iter()
        .map(|u| FleetRow {
            id: u.id.clone(),
            plate: u.plate.clone(),
            model: u.model.clone(),
            year: u.year.clone(),
        })
        .collect()
}

pub fn summarize<R: RiskRecord>(records: &[R], system_date: NaiveDate) -> BoardSummary {
    let mut totals = StatusCounts::default();
    let mut units_with_critical = 0usize;
    let mut units_with_warning = 0usize;
    for r in records {
        let c = r.status_counts();
        totals.critical += c.critical;
        totals.warning += c.warning;
        totals.ok += c.ok;
        if c.critical > 0 {
            units_with_critical += 1;
        }
        if c.warning > 0 {
            units_with_warning += 1;
        }
    }
    BoardSummary {
        system_date: system_date.format("%d/%m/%Y").to_string(),
        units_tracked: records.len(),
        units_with_critical,
        units_with_warning,
        totals,
    }
}
