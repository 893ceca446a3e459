// Entry point and interactive menu.
//
// - Option [1] loads every sheet export and reports what came through.
// - Options [2]-[4] build a status board (search + filter + rank), print a
//   preview, and export the full board as CSV plus a JSON summary.
// - Options [5]-[6] browse the fleet master list and pending tasks.
// Boards are locked behind the operator picker once personnel are loaded.
use chrono::NaiveDate;
use flota_status::config::AppConfig;
use flota_status::expirations::today;
use flota_status::loader::{self, FleetData};
use flota_status::mapper::{filter_pending, find_operator, search_fleet, PendingFilter};
use flota_status::ranking::{board, StatusFilter, TieBreak};
use flota_status::types::{Personnel, UnitExpiration};
use flota_status::{logging, output, reports, util};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

// Loaded once, browsed many times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        operator: None,
    })
});

struct AppState {
    data: Option<FleetData>,
    operator: Option<Personnel>,
}

fn state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice")
}

/// Returns `true` for `Y`, `false` for `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match prompt("Back to Menu (Y/N)").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn prompt_status_filter() -> StatusFilter {
    match prompt("Filter [T]odos / [U]rgente / [P]roximo").to_uppercase().as_str() {
        "U" => StatusFilter::Urgent,
        "P" => StatusFilter::Upcoming,
        _ => StatusFilter::All,
    }
}

fn handle_load(config: &AppConfig) {
    let (data, report) = loader::load_all(config, today());
    println!(
        "Loaded {} sheets ({} unavailable).",
        util::format_int(report.sheets_loaded),
        util::format_int(report.failed_sheets.len())
    );
    if !report.failed_sheets.is_empty() {
        println!("Unavailable: {}", report.failed_sheets.join(", "));
    }
    let source = if report.system_date_from_sheet { "sheet" } else { "local clock" };
    println!(
        "System date: {} (from {})",
        data.system_date.format("%d/%m/%Y"),
        source
    );
    println!(
        "{} units, {} fleet entries, {} pending tasks, {} personnel, {} rubros, {} insumos.\n",
        util::format_int(data.units.len()),
        util::format_int(data.fleet.len()),
        util::format_int(data.pending.len()),
        util::format_int(data.personnel.len()),
        util::format_int(data.rubros.len()),
        util::format_int(data.insumos.len())
    );
    let mut st = state();
    st.data = Some(data);
    st.operator = None;
}

/// Name + PIN check against the personnel sheet. With no personnel loaded
/// the boards stay open.
fn ensure_operator() -> bool {
    let personnel = {
        let st = state();
        if st.operator.is_some() {
            return true;
        }
        match &st.data {
            Some(d) if !d.personnel.is_empty() => d.personnel.clone(),
            _ => return true,
        }
    };
    let name = prompt("Operator name");
    let pin = prompt("PIN");
    match find_operator(&personnel, &name, &pin) {
        Some(p) => {
            println!("Welcome, {}.\n", p.name);
            tracing::info!(operator = %p.name, "operator identified");
            state().operator = Some(p.clone());
            true
        }
        None => {
            println!("Access code incorrect.\n");
            false
        }
    }
}

fn loaded_data() -> Option<FleetData> {
    let data = state().data.clone();
    if data.is_none() {
        println!("Error: No data loaded. Please load the sheets first (option 1).\n");
    }
    data
}

fn export_board<T: serde::Serialize>(config: &AppConfig, file: &str, rows: &[T]) {
    if let Err(e) = output::write_csv(&config.export_path(file), rows) {
        eprintln!("Write error: {}", e);
    }
}

fn handle_alerts(config: &AppConfig) {
    let Some(data) = loaded_data() else { return };
    let search = prompt("Search unit (blank for all)");
    let ranked = board(&data.alerts, &search, StatusFilter::All, TieBreak::InputOrder);

    println!("\nMaintenance Radar");
    println!("(Ranked by worst status, then critical count)\n");
    let rows = reports::alert_board_rows(&ranked, false);
    output::preview_table_rows(&reports::alert_board_rows(&ranked, true), 10);
    export_board(config, "maintenance_board.csv", &rows);

    let summary = reports::summarize(&ranked, data.system_date);
    if let Err(e) = output::write_json(&config.export_path("maintenance_summary.json"), &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "{} units, {} with critical tasks, {} with upcoming tasks.\n",
        summary.units_tracked, summary.units_with_critical, summary.units_with_warning
    );
}

fn handle_expirations(
    config: &AppConfig,
    title: &str,
    file_stem: &str,
    records: &[UnitExpiration],
    date: NaiveDate,
) {
    let search = prompt("Search (blank for all)");
    let filter = prompt_status_filter();
    let ranked = board(records, &search, filter, TieBreak::Identifier);

    println!("\n{}", title);
    println!("(As of {})\n", date.format("%d/%m/%Y"));
    output::preview_table_rows(&reports::expiration_board_rows(&ranked, true), 10);
    export_board(
        config,
        &format!("{}_board.csv", file_stem),
        &reports::expiration_board_rows(&ranked, false),
    );

    let summary = reports::summarize(&ranked, date);
    let summary_path = config.export_path(&format!("{}_summary.json", file_stem));
    if let Err(e) = output::write_json(&summary_path, &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "{} tracked, {} with expired documents, {} expiring soon.\n",
        summary.units_tracked, summary.units_with_critical, summary.units_with_warning
    );
}

fn handle_fleet() {
    let Some(data) = loaded_data() else { return };
    let term = prompt("Search unit, plate or model");
    let hits = search_fleet(&data.fleet, &term);
    println!("\nFleet ({} units)\n", util::format_int(hits.len()));
    output::preview_table_rows(&reports::fleet_rows(&hits), 25);
}

fn handle_pending() {
    let Some(data) = loaded_data() else { return };
    let filter = PendingFilter {
        search: prompt("Search task or id"),
        unit: Some(prompt("Unit (blank for all)")),
        date: Some(prompt("Date yyyy-mm-dd (blank for all)")),
    };
    let hits = filter_pending(&data.pending, &filter);
    println!("\n{} records\n", util::format_int(hits.len()));
    for t in hits {
        println!(
            "[{}] {} {} | {} | {} | {}",
            t.id, t.unit, t.date, t.priority, t.status, t.description
        );
    }
    println!();
}

fn main() {
    logging::init();
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        println!("Fleet Status Boards:");
        println!("[1] Load sheets");
        println!("[2] Maintenance radar");
        println!("[3] Unit document expirations");
        println!("[4] Driver document expirations");
        println!("[5] Fleet list");
        println!("[6] Pending tasks\n");
        match read_choice().as_str() {
            "1" => handle_load(&config),
            choice @ ("2" | "3" | "4") => {
                if !ensure_operator() {
                    continue;
                }
                match choice {
                    "2" => handle_alerts(&config),
                    "3" => {
                        if let Some(d) = loaded_data() {
                            handle_expirations(
                                &config,
                                "Unit Document Expirations",
                                "unit_expirations",
                                &d.unit_expirations,
                                d.system_date,
                            );
                        }
                    }
                    _ => {
                        if let Some(d) = loaded_data() {
                            handle_expirations(
                                &config,
                                "Driver Document Expirations",
                                "driver_expirations",
                                &d.personnel_expirations,
                                d.system_date,
                            );
                        }
                    }
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "5" => handle_fleet(),
            "6" => handle_pending(),
            _ => println!("Invalid choice. Please enter 1-6.\n"),
        }
    }
}
