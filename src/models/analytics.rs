//! Modelos de Analytics
//!
//! Este módulo contiene los KPIs y las agrupaciones listas para gráfico
//! que consume el dashboard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::vehicle::RiskLevel;

/// Resumen para dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub evaluated_at: NaiveDateTime,

    // Conteos de flota
    pub total_vehicles: usize,
    pub high_risk_vehicles: usize,
    pub medium_risk_vehicles: usize,
    pub low_risk_vehicles: usize,
    pub unknown_risk_vehicles: usize,

    // Métricas de mantenimiento
    pub average_days_since_service: Option<f64>,
    pub average_breakdown_rate: Option<f64>,
    pub total_breakdowns: u64,

    // Métricas operativas
    pub average_mileage_km: Option<f64>,
    pub average_fuel_efficiency: Option<f64>,
}

/// Conteo por depósito, desglosado por nivel de riesgo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotBreakdown {
    pub depot: String,
    pub vehicles: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

/// Porción del gráfico de distribución de riesgo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCount {
    pub risk_level: RiskLevel,
    pub count: usize,
}

/// Barra de días desde el servicio por vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAgeBar {
    pub vehicle_id: String,
    pub days_since_service: Option<i64>,
    pub risk_level: RiskLevel,
}

/// Punto del gráfico de dispersión
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub vehicle_id: String,
    pub days_since_service: Option<i64>,
    pub breakdown_rate: Option<f64>,
    pub mileage_km: u32,
    pub risk_level: RiskLevel,
}

/// Todas las agrupaciones para gráficos de un subconjunto filtrado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetCharts {
    pub by_depot: Vec<DepotBreakdown>,
    pub risk_distribution: Vec<RiskCount>,
    pub days_by_vehicle: Vec<ServiceAgeBar>,
    pub scatter: Vec<ScatterPoint>,
}
