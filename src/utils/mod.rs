//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de los campos del fichero de flota.

pub mod errors;
pub mod validation;

pub use errors::{FleetError, FleetResult};
