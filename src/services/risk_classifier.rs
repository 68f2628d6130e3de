//! Clasificador de riesgo de mantenimiento
//!
//! Reglas fijas, evaluadas en orden (la primera que aplica gana):
//! 1. `days_since_service > 90` o `breakdown_rate > 0.002` → High
//! 2. `days_since_service > 60` → Medium
//! 3. resto → Low
//!
//! Todos los umbrales son exclusivos. Sin fecha de servicio solo aplica la
//! regla de tasa; si no se cumple el vehículo queda como `Unknown`. Sin tasa
//! (cero horas de motor) solo aplican las reglas de días.

use crate::models::vehicle::{ClassifiedVehicle, EnrichedVehicle, RiskLevel};

/// Días sin servicio a partir de los cuales el riesgo es alto
pub const HIGH_RISK_DAYS: i64 = 90;

/// Días sin servicio a partir de los cuales el riesgo es medio
pub const MEDIUM_RISK_DAYS: i64 = 60;

/// Averías por hora de motor a partir de las cuales el riesgo es alto
pub const HIGH_RISK_BREAKDOWN_RATE: f64 = 0.002;

/// Clasificar a partir de las métricas derivadas
pub fn classify(days_since_service: Option<i64>, breakdown_rate: Option<f64>) -> RiskLevel {
    let rate_exceeded = breakdown_rate.map_or(false, |rate| rate > HIGH_RISK_BREAKDOWN_RATE);

    match days_since_service {
        Some(days) if days > HIGH_RISK_DAYS || rate_exceeded => RiskLevel::High,
        Some(days) if days > MEDIUM_RISK_DAYS => RiskLevel::Medium,
        Some(_) => RiskLevel::Low,
        None if rate_exceeded => RiskLevel::High,
        None => RiskLevel::Unknown,
    }
}

/// Clasificar un vehículo enriquecido
pub fn classify_vehicle(vehicle: &EnrichedVehicle) -> RiskLevel {
    classify(vehicle.days_since_service, vehicle.breakdown_rate)
}

/// Etiquetar toda la flota, conservando el orden
pub fn classify_fleet(vehicles: Vec<EnrichedVehicle>) -> Vec<ClassifiedVehicle> {
    vehicles
        .into_iter()
        .map(|vehicle| {
            let risk_level = classify_vehicle(&vehicle);
            ClassifiedVehicle { vehicle, risk_level }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_thresholds_are_exclusive() {
        assert_eq!(classify(Some(90), Some(0.0)), RiskLevel::Medium);
        assert_eq!(classify(Some(91), Some(0.0)), RiskLevel::High);
        assert_eq!(classify(Some(61), Some(0.0)), RiskLevel::Medium);
        assert_eq!(classify(Some(60), Some(0.0)), RiskLevel::Low);
        assert_eq!(classify(Some(0), Some(0.0)), RiskLevel::Low);
    }

    #[test]
    fn test_rate_threshold_is_exclusive() {
        assert_eq!(classify(Some(10), Some(HIGH_RISK_BREAKDOWN_RATE)), RiskLevel::Low);
        assert_eq!(classify(Some(10), Some(0.0021)), RiskLevel::High);
    }

    #[test]
    fn test_rate_overrides_days() {
        assert_eq!(classify(Some(65), Some(0.0021)), RiskLevel::High);
        assert_eq!(classify(Some(-3), Some(0.01)), RiskLevel::High);
    }

    #[test]
    fn test_negative_days_are_low() {
        assert_eq!(classify(Some(-5), Some(0.0)), RiskLevel::Low);
    }

    #[test]
    fn test_missing_service_date_policy() {
        assert_eq!(classify(None, Some(0.0021)), RiskLevel::High);
        assert_eq!(classify(None, Some(0.001)), RiskLevel::Unknown);
        assert_eq!(classify(None, None), RiskLevel::Unknown);
    }

    #[test]
    fn test_missing_rate_uses_day_rules_only() {
        assert_eq!(classify(Some(95), None), RiskLevel::High);
        assert_eq!(classify(Some(70), None), RiskLevel::Medium);
        assert_eq!(classify(Some(5), None), RiskLevel::Low);
    }
}
