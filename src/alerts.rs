// Maintenance-interval alerts.
//
// Sheet layout: column 0 is the unit, column 1 its odometer, and every
// column from 2 on is a task whose cell holds the kilometres left before
// the task is due.
use crate::types::{cell, AlertItem, MaintenanceAlert, RawGrid, Status};
use crate::util::parse_int_lenient;

pub const CRITICAL_KM: i64 = 1000;
pub const WARNING_KM: i64 = 3000;

const UNIT_COL: usize = 0;
const KM_COL: usize = 1;
const FIRST_TASK_COL: usize = 2;

/// `<= 1000` critical, `<= 3000` warning, otherwise ok.
pub fn classify_km(remaining_km: i64) -> Status {
    if remaining_km <= CRITICAL_KM {
        Status::Critical
    } else if remaining_km <= WARNING_KM {
        Status::Warning
    } else {
        Status::Ok
    }
}

/// Derive one alert per row with a unit id. Items keep header column order.
///
/// Unreadable numbers count as 0, which lands them in critical.
pub fn derive_alerts(grid: &RawGrid) -> Vec<MaintenanceAlert> {
    let Some(headers) = grid.first() else {
        return Vec::new();
    };

    let mut alerts = Vec::new();
    for row in grid.iter().skip(1) {
        let unit = cell(row, UNIT_COL);
        if unit.is_empty() {
            continue;
        }
        let current_km = parse_int_lenient(cell(row, KM_COL)).unwrap_or(0);

        let items: Vec<AlertItem> = (FIRST_TASK_COL..row.len())
            .filter_map(|i| {
                let task = cell(headers, i);
                if task.is_empty() {
                    return None;
                }
                let remaining_km = parse_int_lenient(&row[i]).unwrap_or(0);
                Some(AlertItem {
                    task: task.to_string(),
                    remaining_km,
                    status: classify_km(remaining_km),
                })
            })
            .collect();

        alerts.push(MaintenanceAlert {
            unit: unit.to_string(),
            current_km,
            items,
        });
    }
    tracing::debug!(units = alerts.len(), "derived maintenance alerts");
    alerts
}
