//! Sistema de manejo de errores
//!
//! Este módulo define los errores del pipeline de flota y su conversión
//! a respuestas HTTP para el dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Fleet data file not found: {path}")]
    MissingFile { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl FleetError {
    /// Código estable para clientes del dashboard
    pub fn code(&self) -> &'static str {
        match self {
            FleetError::MissingFile { .. } => "MISSING_FILE",
            FleetError::Io(_) => "IO_ERROR",
            FleetError::Csv(_) => "CSV_ERROR",
            FleetError::Config(_) => "CONFIG_ERROR",
            FleetError::Validation(_) => "VALIDATION_ERROR",
            FleetError::BadRequest(_) => "BAD_REQUEST",
            FleetError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            FleetError::MissingFile { .. } => StatusCode::SERVICE_UNAVAILABLE,
            FleetError::Validation(_) | FleetError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FleetError::Io(_)
            | FleetError::Csv(_)
            | FleetError::Config(_)
            | FleetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let error_response = match self {
            FleetError::MissingFile { path } => {
                tracing::error!("❌ Fichero de flota no encontrado: {}", path);
                ErrorResponse {
                    error: "Missing File".to_string(),
                    message: "The fleet data file is not available".to_string(),
                    details: Some(json!({ "path": path })),
                    code,
                }
            }

            FleetError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided filters are invalid".to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            FleetError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            other => {
                tracing::error!("Internal error: {}", other);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": other.to_string() })),
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type FleetResult<T> = Result<T, FleetError>;

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> FleetError {
    FleetError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> FleetError {
    FleetError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_maps_to_service_unavailable() {
        let err = FleetError::MissingFile { path: "data/fleet.csv".to_string() };
        assert_eq!(err.code(), "MISSING_FILE");
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let err = bad_request_error("unknown risk level 'Severe'");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let err = internal_error("lock poisoned");
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
