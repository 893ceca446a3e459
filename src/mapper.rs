// Row mappers for the master-data sheets.
//
// Every mapper skips the header row and drops rows whose identifying column
// is blank. Short rows are fine: missing columns fall back to `S/D` or the
// sheet's documented default. Duplicate ids are kept as-is.
use crate::types::{
    cell, FleetStatus, FleetUnit, Insumo, PendingTask, Personnel, RawGrid, Rubro, Unit, NO_DATA,
};
use crate::util::contains_ci;

fn data_rows(grid: &RawGrid) -> impl Iterator<Item = &Vec<String>> {
    grid.iter().skip(1)
}

fn has_id(row: &[String]) -> bool {
    !cell(row, 0).trim().is_empty()
}

fn cell_or(row: &[String], idx: usize, default: &str) -> String {
    match cell(row, idx) {
        "" => default.to_string(),
        v => v.to_string(),
    }
}

pub fn map_units(grid: &RawGrid) -> Vec<Unit> {
    data_rows(grid)
        .filter(|r| has_id(r))
        .map(|r| Unit {
            id: r[0].clone(),
            name: r[0].clone(),
        })
        .collect()
}

/// Both the name and the PIN column are required.
pub fn map_personnel(grid: &RawGrid) -> Vec<Personnel> {
    data_rows(grid)
        .filter(|r| !cell(r, 0).is_empty() && !cell(r, 1).is_empty())
        .map(|r| Personnel {
            name: r[0].clone(),
            code: r[1].clone(),
        })
        .collect()
}

pub fn map_rubros(grid: &RawGrid) -> Vec<Rubro> {
    data_rows(grid)
        .filter(|r| has_id(r))
        .map(|r| Rubro {
            id: r[0].clone(),
            name: r[0].clone(),
        })
        .collect()
}

pub fn map_insumos(grid: &RawGrid) -> Vec<Insumo> {
    data_rows(grid)
        .filter(|r| has_id(r))
        .map(|r| Insumo {
            id: r[0].clone(),
            name: r[0].clone(),
        })
        .collect()
}

/// Columns: id, plate, model, year, chassis, engine.
pub fn map_fleet(grid: &RawGrid) -> Vec<FleetUnit> {
    data_rows(grid)
        .filter(|r| has_id(r))
        .map(|r| {
            let plate = cell_or(r, 1, NO_DATA);
            FleetUnit {
                id: r[0].clone(),
                name: format!("{} - {}", r[0], plate),
                plate,
                model: cell_or(r, 2, NO_DATA),
                year: cell_or(r, 3, NO_DATA),
                chassis_number: cell_or(r, 4, NO_DATA),
                engine_number: cell_or(r, 5, NO_DATA),
                status: FleetStatus::Activo,
            }
        })
        .collect()
}

/// Columns: id, unit, date, priority, task, status, driver.
pub fn map_pending(grid: &RawGrid) -> Vec<PendingTask> {
    data_rows(grid)
        .filter(|r| has_id(r))
        .map(|r| PendingTask {
            id: r[0].clone(),
            unit: cell_or(r, 1, NO_DATA),
            date: cell_or(r, 2, NO_DATA),
            priority: cell_or(r, 3, "Media"),
            description: cell_or(r, 4, NO_DATA),
            status: cell_or(r, 5, "Pendiente"),
            driver: cell_or(r, 6, NO_DATA),
        })
        .collect()
}

/// Name + PIN gate for the operator picker. Not a security boundary.
pub fn find_operator<'a>(personnel: &'a [Personnel], name: &str, pin: &str) -> Option<&'a Personnel> {
    personnel
        .iter()
        .find(|p| p.name.trim() == name.trim() && p.code.trim() == pin.trim())
}

/// Fleet search over id, plate and model.
pub fn search_fleet<'a>(units: &'a [FleetUnit], term: &str) -> Vec<&'a FleetUnit> {
    units
        .iter()
        .filter(|u| contains_ci(&u.id, term) || contains_ci(&u.plate, term) || contains_ci(&u.model, term))
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct PendingFilter {
    pub search: String,
    pub unit: Option<String>,
    /// ISO `yyyy-mm-dd`, as a date picker hands it over.
    pub date: Option<String>,
}

impl PendingFilter {
    pub fn matches(&self, task: &PendingTask) -> bool {
        let search = contains_ci(&task.description, &self.search) || contains_ci(&task.id, &self.search);
        let unit = self.unit.as_deref().map_or(true, |u| u.is_empty() || task.unit == u);
        let date = self.date.as_deref().filter(|d| !d.is_empty()).map_or(true, |iso| {
            let mut parts = iso.splitn(3, '-');
            let (y, m, d) = (parts.next(), parts.next(), parts.next());
            match (y, m, d) {
                (Some(y), Some(m), Some(d)) => task.date == format!("{}/{}/{}", d, m, y),
                _ => false,
            }
        });
        search && unit && date
    }
}

pub fn filter_pending<'a>(tasks: &'a [PendingTask], filter: &PendingFilter) -> Vec<&'a PendingTask> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid;

    #[test]
    fn units_skip_header_and_blank_ids() {
        let g = parse_grid("Unidad\nT-10\n,x\nT-11\nT-10");
        let units = map_units(&g);
        let ids: Vec<&str> = units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["T-10", "T-11", "T-10"]);
        assert_eq!(units[0].name, "T-10");
    }

    #[test]
    fn personnel_need_name_and_code() {
        let g = parse_grid("Nombre,PIN\nAna,1234\nLuis,\n,999\nEva,0007");
        let p = map_personnel(&g);
        assert_eq!(p.len(), 2);
        assert_eq!(p[1].code, "0007");
    }

    #[test]
    fn fleet_defaults_missing_columns() {
        let g = parse_grid("Interno,Patente,Modelo,Anio,Chasis,Motor\nT-10,AB123CD\nT-11,,Scania");
        let f = map_fleet(&g);
        assert_eq!(f[0].name, "T-10 - AB123CD");
        assert_eq!(f[0].model, NO_DATA);
        assert_eq!(f[0].engine_number, NO_DATA);
        assert_eq!(f[1].plate, NO_DATA);
        assert_eq!(f[1].model, "Scania");
        assert_eq!(f[1].status, FleetStatus::Activo);
    }

    #[test]
    fn pending_defaults() {
        let g = parse_grid("ID,Interno,Fecha,Prioridad,Tarea,Estado,Chofer\nP-1,T-10,05/03/2024\n,T-11");
        let p = map_pending(&g);
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].priority, "Media");
        assert_eq!(p[0].status, "Pendiente");
        assert_eq!(p[0].description, NO_DATA);
        assert_eq!(p[0].driver, NO_DATA);
    }

    #[test]
    fn rubros_and_insumos_map_first_column() {
        let g = parse_grid("Nombre\nFrenos\n\nMotor");
        assert_eq!(map_rubros(&g).len(), 2);
        assert_eq!(map_insumos(&g)[1].name, "Motor");
    }

    #[test]
    fn operator_match_trims_both_fields() {
        let staff = vec![Personnel { name: "Ana".into(), code: "1234".into() }];
        assert!(find_operator(&staff, " Ana ", "1234 ").is_some());
        assert!(find_operator(&staff, "Ana", "4321").is_none());
        assert!(find_operator(&staff, "ana", "1234").is_none());
    }

    #[test]
    fn fleet_search_checks_plate_and_model() {
        let g = parse_grid("a,b,c\nT-10,AB123CD,Scania\nT-11,ZZ999ZZ,Volvo");
        let f = map_fleet(&g);
        assert_eq!(search_fleet(&f, "volvo").len(), 1);
        assert_eq!(search_fleet(&f, "ab1")[0].id, "T-10");
        assert_eq!(search_fleet(&f, "").len(), 2);
    }

    #[test]
    fn pending_filter_by_unit_and_iso_date() {
        let g = parse_grid("h\nP-1,T-10,05/03/2024,Alta,Cambiar correa\nP-2,T-11,06/03/2024,Baja,Revisar luces");
        let p = map_pending(&g);
        let f = PendingFilter {
            search: "CORREA".into(),
            unit: Some("T-10".into()),
            date: Some("2024-03-05".into()),
        };
        let hits = filter_pending(&p, &f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "P-1");
        assert_eq!(filter_pending(&p, &PendingFilter::default()).len(), 2);
    }
}
