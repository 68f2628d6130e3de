//! Tabla de flota clasificada
//!
//! Estructura en memoria, ordenada e inmutable, sobre la que el dashboard
//! filtra y agrega sin volver a derivar métricas.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;

use super::vehicle::{ClassifiedVehicle, RiskLevel};

/// Opción de depósito que representa "sin filtro"
pub const ALL_DEPOTS: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetTable {
    /// Instante respecto al que se calcularon los días desde el servicio
    pub evaluated_at: NaiveDateTime,
    pub vehicles: Vec<ClassifiedVehicle>,
}

impl FleetTable {
    pub fn new(evaluated_at: NaiveDateTime, vehicles: Vec<ClassifiedVehicle>) -> Self {
        Self { evaluated_at, vehicles }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedVehicle> {
        self.vehicles.iter()
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&ClassifiedVehicle> {
        self.vehicles.iter().find(|v| v.vehicle_id() == vehicle_id)
    }

    /// Nombres de depósito presentes, ordenados y sin duplicados
    pub fn depots(&self) -> Vec<String> {
        self.vehicles
            .iter()
            .map(|v| v.depot().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Opciones del selector de depósito: "All" seguido de los depósitos
    pub fn depot_options(&self) -> Vec<String> {
        std::iter::once(ALL_DEPOTS.to_string())
            .chain(self.depots())
            .collect()
    }

    pub fn risk_levels(&self) -> Vec<RiskLevel> {
        self.vehicles.iter().map(|v| v.risk_level).collect()
    }

    pub fn count_by_risk(&self, risk_level: RiskLevel) -> usize {
        self.vehicles.iter().filter(|v| v.risk_level == risk_level).count()
    }
}
