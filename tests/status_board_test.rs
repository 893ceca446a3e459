// End-to-end checks: sheet text in, ranked board records out.

use chrono::NaiveDate;
use flota_status::alerts::derive_alerts;
use flota_status::expirations::{derive_expirations, ExpirationSheet};
use flota_status::grid::parse_grid;
use flota_status::logging;
use flota_status::ranking::{board, rank_alerts, rank_expirations, StatusFilter, TieBreak};
use flota_status::{AlertItem, MaintenanceAlert, Status};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn parser_splits_plain_text() {
    let g = parse_grid("a,b,c\n1,2,3");
    assert_eq!(g, grid(&[&["a", "b", "c"], &["1", "2", "3"]]));
}

#[test]
fn parser_uses_semicolons_throughout_when_dominant() {
    let g = parse_grid("UNIDAD;KM;Aceite\nT-10;50000;800,5");
    assert_eq!(g[1], vec!["T-10", "50000", "800,5"]);
}

#[test]
fn single_alert_scenario() {
    logging::init_test();
    let g = grid(&[&["UNIDAD", "KM_ACTUAL", "Aceite Motor"], &["T-10", "50000", "800"]]);
    let alerts = derive_alerts(&g);
    assert_eq!(
        alerts,
        vec![MaintenanceAlert {
            unit: "T-10".into(),
            current_km: 50000,
            items: vec![AlertItem {
                task: "Aceite Motor".into(),
                remaining_km: 800,
                status: Status::Critical,
            }],
        }]
    );
}

#[test]
fn malformed_alert_row_fails_safe() {
    let g = grid(&[&["UNIDAD", "KM_ACTUAL", "Aceite Motor"], &["T-11", "abc", "xyz"]]);
    let a = &derive_alerts(&g)[0];
    assert_eq!(a.current_km, 0);
    assert_eq!(a.items[0].remaining_km, 0);
    assert_eq!(a.items[0].status, Status::Critical);
}

#[test]
fn alert_output_never_exceeds_rows_with_ids() {
    let g = parse_grid("UNIDAD,KM,Aceite\nT-1,1,1\n,2,2\nT-2,3,3\n  ,4,4");
    let a = derive_alerts(&g);
    assert_eq!(a.len(), 2);
    assert!(a.iter().all(|x| !x.unit.is_empty()));
}

#[test]
fn expiration_scenario() {
    let g = grid(&[&["Unidad", "Seguro", "Fumigacion"], &["T-10", "31/12/2099", "01/01/2000"]]);
    let out = derive_expirations(&g, ymd(2024, 1, 1), ExpirationSheet::Units);
    assert_eq!(out.len(), 1);
    let docs = &out[0].expirations;
    assert_eq!(docs[0].document, "Seguro");
    assert_eq!(docs[0].status, Status::Ok);
    assert_eq!(docs[1].document, "Fumigacion");
    assert!(docs[1].days_left < 0);
    assert_eq!(docs[1].status, Status::Critical);
}

#[test]
fn fumigation_and_default_windows_differ() {
    let g = parse_grid("Unidad,Seguro,Fumigacion\nT-10,10/01/2024,10/01/2024\nT-11,31/01/2024,09/01/2024");
    let out = derive_expirations(&g, ymd(2024, 1, 1), ExpirationSheet::Units);
    let t10 = &out[0].expirations;
    assert_eq!(t10[0].days_left, 9);
    assert_eq!(t10[0].status, Status::Warning);
    assert_eq!(t10[1].status, Status::Ok);
    let t11 = &out[1].expirations;
    assert_eq!(t11[0].days_left, 30);
    assert_eq!(t11[0].status, Status::Warning);
    assert_eq!(t11[1].days_left, 8);
    assert_eq!(t11[1].status, Status::Warning);
}

#[test]
fn derivation_is_idempotent() {
    let alerts = parse_grid("UNIDAD,KM,Aceite,Filtros\nT-10,1,800,4000\nT-11,x,2000,y");
    assert_eq!(derive_alerts(&alerts), derive_alerts(&alerts));

    let exp = parse_grid("Unidad,Seguro,VTV\nT-10,01/02/2024,nope\nT-11,15/01/2024,01/01/2024");
    let date = ymd(2024, 1, 1);
    assert_eq!(
        derive_expirations(&exp, date, ExpirationSheet::Units),
        derive_expirations(&exp, date, ExpirationSheet::Units)
    );
}

#[test]
fn alert_board_ranks_riskiest_first_and_keeps_ties_in_order() {
    let g = parse_grid(
        "UNIDAD,KM,Aceite,Filtros\n\
         T-1,0,9000,9000\n\
         T-2,0,500,9000\n\
         T-3,0,2000,9000\n\
         T-4,0,500,500\n\
         T-5,0,500,9000",
    );
    let mut alerts = derive_alerts(&g);
    rank_alerts(&mut alerts);
    let order: Vec<&str> = alerts.iter().map(|a| a.unit.as_str()).collect();
    assert_eq!(order, vec!["T-4", "T-2", "T-5", "T-3", "T-1"]);
}

#[test]
fn expiration_board_filters_then_ranks_by_name() {
    let g = parse_grid(
        "Legajo,Nombre,Licencia,Curso\n\
         1,Zoe,01/01/2023,01/06/2030\n\
         2,Ana,01/01/2023,01/06/2030\n\
         3,,01/01/2023,\n\
         4,Beto,15/01/2024,01/06/2030\n\
         5,Carla,01/06/2030,01/06/2030",
    );
    let mut records = derive_expirations(&g, ymd(2024, 1, 1), ExpirationSheet::Personnel);
    assert_eq!(records.len(), 4);

    let urgent = board(&records, "", StatusFilter::Urgent, TieBreak::Identifier);
    let names: Vec<&str> = urgent.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Zoe"]);

    let upcoming = board(&records, "", StatusFilter::Upcoming, TieBreak::Identifier);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].unit, "Beto");

    rank_expirations(&mut records);
    let all: Vec<&str> = records.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(all, vec!["Ana", "Zoe", "Beto", "Carla"]);
}

#[test]
fn empty_input_yields_nothing() {
    let g = parse_grid("");
    assert!(derive_alerts(&g).is_empty());
    assert!(derive_expirations(&g, ymd(2024, 1, 1), ExpirationSheet::Personnel).is_empty());
}
