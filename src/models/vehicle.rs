//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo tal como llega en el fichero
//! de flota y sus variantes enriquecida y clasificada.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cabecera fija del fichero de flota, en orden
pub const FLEET_COLUMNS: [&str; 7] = [
    "vehicle_id",
    "mileage_km",
    "engine_hours",
    "last_service_date",
    "breakdowns_last_6m",
    "fuel_efficiency",
    "depot",
];

/// Depósitos conocidos por el generador. El campo `depot` sigue siendo abierto.
pub const DEPOTS: [&str; 5] = ["North", "South", "Central", "East", "West"];

/// Vehículo tal como se lee del fichero - una fila por vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle_id: String,
    pub mileage_km: u32,
    pub engine_hours: u32,
    pub last_service_date: Option<NaiveDate>,
    pub breakdowns_last_6m: u32,
    pub fuel_efficiency: f64,
    pub depot: String,
}

/// Vehículo con las métricas derivadas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedVehicle {
    #[serde(flatten)]
    pub record: VehicleRecord,
    /// Días completos desde el último servicio. Depende del instante de evaluación.
    pub days_since_service: Option<i64>,
    /// Averías por hora de motor. `None` si `engine_hours == 0`.
    pub breakdown_rate: Option<f64>,
}

/// Vehículo enriquecido y etiquetado con su nivel de riesgo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedVehicle {
    #[serde(flatten)]
    pub vehicle: EnrichedVehicle,
    pub risk_level: RiskLevel,
}

impl ClassifiedVehicle {
    pub fn record(&self) -> &VehicleRecord {
        &self.vehicle.record
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle.record.vehicle_id
    }

    pub fn depot(&self) -> &str {
        &self.vehicle.record.depot
    }

    pub fn days_since_service(&self) -> Option<i64> {
        self.vehicle.days_since_service
    }

    pub fn breakdown_rate(&self) -> Option<f64> {
        self.vehicle.breakdown_rate
    }
}

/// Nivel de riesgo de mantenimiento
///
/// `Unknown` recoge los vehículos sin fecha de servicio que no superan
/// el umbral de tasa de averías.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    /// Orden de presentación en gráficos y resúmenes
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "unknown" => Ok(RiskLevel::Unknown),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parsing_is_case_insensitive() {
        assert_eq!("high".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert_eq!(" Medium ".parse::<RiskLevel>(), Ok(RiskLevel::Medium));
        assert_eq!("LOW".parse::<RiskLevel>(), Ok(RiskLevel::Low));
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_classified_vehicle_serializes_flat() {
        let vehicle = ClassifiedVehicle {
            vehicle: EnrichedVehicle {
                record: VehicleRecord {
                    vehicle_id: "T001".to_string(),
                    mileage_km: 84213,
                    engine_hours: 1532,
                    last_service_date: NaiveDate::from_ymd_opt(2024, 3, 11),
                    breakdowns_last_6m: 2,
                    fuel_efficiency: 7.3,
                    depot: "North".to_string(),
                },
                days_since_service: Some(30),
                breakdown_rate: Some(2.0 / 1532.0),
            },
            risk_level: RiskLevel::Low,
        };

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["vehicle_id"], "T001");
        assert_eq!(json["last_service_date"], "2024-03-11");
        assert_eq!(json["days_since_service"], 30);
        assert_eq!(json["risk_level"], "Low");
    }
}
