//! Repositorios
//!
//! Este módulo contiene el acceso a las fuentes de datos de flota.

pub mod fleet_repository;

pub use fleet_repository::{CsvFleetRepository, FleetRepository, SourceFingerprint};
