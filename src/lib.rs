//! Status boards for a truck workshop's fleet sheets.
//!
//! Published spreadsheet exports are parsed into grids ([`grid`]), mapped
//! into master data ([`mapper`]), and turned into maintenance-interval
//! alerts ([`alerts`]) and document-expiration alerts ([`expirations`]).
//! [`ranking`] orders both boards riskiest first.
pub mod alerts;
pub mod config;
pub mod error;
pub mod expirations;
pub mod grid;
pub mod loader;
pub mod logging;
pub mod mapper;
pub mod output;
pub mod ranking;
pub mod reports;
pub mod types;
pub mod util;

pub use error::{FlotaError, Result};
pub use types::{
    AlertItem, ExpirationItem, MaintenanceAlert, RawGrid, Status, UnitExpiration,
};
