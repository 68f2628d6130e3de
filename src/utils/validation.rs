//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para convertir los campos
//! textuales del fichero de flota en tipos fuertes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::ValidationError;

/// Formato canónico de fechas en el fichero de flota
pub const SERVICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, SERVICE_DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Interpretar la fecha de último servicio de forma tolerante.
///
/// Acepta `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` y RFC3339. Un valor vacío
/// o ilegible devuelve `None`: nunca aborta la carga.
pub fn parse_service_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;

    if let Ok(date) = validate_date(raw) {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    tracing::debug!("📅 Fecha de servicio ilegible '{}', se trata como nula", raw);
    None
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
