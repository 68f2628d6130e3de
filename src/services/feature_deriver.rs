//! Derivación de métricas de mantenimiento
//!
//! Calcula `days_since_service` y `breakdown_rate` para cada vehículo
//! respecto a un instante de evaluación explícito.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::models::vehicle::{EnrichedVehicle, VehicleRecord};

const SECONDS_PER_DAY: i64 = 86_400;

/// Días completos entre el instante de evaluación y la fecha de servicio.
///
/// Se redondea hacia abajo, así que una fecha futura da un valor negativo
/// (medio día en el futuro es `-1`).
pub fn days_since_service(last_service_date: Option<NaiveDate>, evaluated_at: NaiveDateTime) -> Option<i64> {
    let service_start = last_service_date?.and_hms_opt(0, 0, 0)?;
    let elapsed = evaluated_at - service_start;
    Some(elapsed.num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Averías por hora de motor. Sin horas de motor la tasa no está definida.
pub fn breakdown_rate(breakdowns_last_6m: u32, engine_hours: u32) -> Option<f64> {
    if engine_hours == 0 {
        return None;
    }
    Some(breakdowns_last_6m as f64 / engine_hours as f64)
}

/// Enriquecer un vehículo con sus métricas derivadas
pub fn enrich_vehicle(record: VehicleRecord, evaluated_at: NaiveDateTime) -> EnrichedVehicle {
    let days = days_since_service(record.last_service_date, evaluated_at);
    let rate = breakdown_rate(record.breakdowns_last_6m, record.engine_hours);

    if rate.is_none() {
        warn!("⚠️ Vehículo {} sin horas de motor, excluido del scoring por tasa", record.vehicle_id);
    }
    if days.is_none() {
        debug!("📅 Vehículo {} sin fecha de servicio", record.vehicle_id);
    }

    EnrichedVehicle {
        record,
        days_since_service: days,
        breakdown_rate: rate,
    }
}

/// Enriquecer toda la flota en una sola pasada, conservando el orden
pub fn derive_features(records: &[VehicleRecord], evaluated_at: NaiveDateTime) -> Vec<EnrichedVehicle> {
    records
        .iter()
        .cloned()
        .map(|record| enrich_vehicle(record, evaluated_at))
        .collect()
}
