// Where each sheet export is read from and where boards are written.
//
// The file is optional JSON. Any sheet left out resolves to its
// conventional file name under `data_dir`.
use crate::error::{FlotaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "FLOTA_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "flota.json";

/// Every published sheet the front-end reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    SystemState,
    Units,
    Fleet,
    Pending,
    Personnel,
    Rubros,
    Insumos,
    Alerts,
    UnitExpirations,
    PersonnelExpirations,
}

impl Sheet {
    pub fn name(self) -> &'static str {
        match self {
            Sheet::SystemState => "estado",
            Sheet::Units => "unidades",
            Sheet::Fleet => "flota",
            Sheet::Pending => "pendientes",
            Sheet::Personnel => "personal",
            Sheet::Rubros => "rubros",
            Sheet::Insumos => "insumos",
            Sheet::Alerts => "alertas",
            Sheet::UnitExpirations => "vencimientos_unidades",
            Sheet::PersonnelExpirations => "vencimientos_choferes",
        }
    }

    fn default_file(self) -> String {
        format!("{}.csv", self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSources {
    pub system_state: Option<PathBuf>,
    pub units: Option<PathBuf>,
    pub fleet: Option<PathBuf>,
    pub pending: Option<PathBuf>,
    pub personnel: Option<PathBuf>,
    pub rubros: Option<PathBuf>,
    pub insumos: Option<PathBuf>,
    pub alerts: Option<PathBuf>,
    pub unit_expirations: Option<PathBuf>,
    pub personnel_expirations: Option<PathBuf>,
}

impl SheetSources {
    fn get(&self, sheet: Sheet) -> Option<&PathBuf> {
        match sheet {
            Sheet::SystemState => self.system_state.as_ref(),
            Sheet::Units => self.units.as_ref(),
            Sheet::Fleet => self.fleet.as_ref(),
            Sheet::Pending => self.pending.as_ref(),
            Sheet::Personnel => self.personnel.as_ref(),
            Sheet::Rubros => self.rubros.as_ref(),
            Sheet::Insumos => self.insumos.as_ref(),
            Sheet::Alerts => self.alerts.as_ref(),
            Sheet::UnitExpirations => self.unit_expirations.as_ref(),
            Sheet::PersonnelExpirations => self.personnel_expirations.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub sheets: SheetSources,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            export_dir: PathBuf::from("."),
            sheets: SheetSources::default(),
        }
    }
}

impl AppConfig {
    /// Read the file named by `FLOTA_CONFIG`, else `flota.json`. A missing
    /// file means defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(FlotaError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| FlotaError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Relative sheet paths resolve against `data_dir`.
    pub fn sheet_path(&self, sheet: Sheet) -> PathBuf {
        match self.sheets.get(sheet) {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.data_dir.join(p),
            None => self.data_dir.join(sheet.default_file()),
        }
    }

    pub fn export_path(&self, file: &str) -> PathBuf {
        self.export_dir.join(file)
    }
}
