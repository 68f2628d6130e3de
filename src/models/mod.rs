//! Modelos de datos
//!
//! Este módulo contiene los registros de vehículo, los niveles de riesgo,
//! la tabla clasificada y los modelos de analytics del dashboard.

pub mod analytics;
pub mod fleet_table;
pub mod vehicle;

pub use analytics::*;
pub use fleet_table::{FleetTable, ALL_DEPOTS};
pub use vehicle::*;
