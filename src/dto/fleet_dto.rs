use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::cache::CacheStats;
use crate::models::vehicle::{ClassifiedVehicle, RiskLevel};
use crate::services::{DepotSelection, FleetFilters};
use crate::utils::errors::{bad_request_error, FleetResult};

// Query común de los endpoints de lectura del dashboard
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FleetQuery {
    #[validate(length(max = 64))]
    pub depot: Option<String>,

    /// Lista separada por comas: `High,Medium`
    #[validate(length(max = 64))]
    pub risk: Option<String>,

    #[validate(length(max = 64))]
    pub search: Option<String>,
}

impl FleetQuery {
    /// Validar y convertir en filtros del dashboard
    pub fn into_filters(self) -> FleetResult<FleetFilters> {
        self.validate()?;

        let risk_levels: Option<HashSet<RiskLevel>> = match self.risk {
            None => None,
            Some(raw) => Some(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<RiskLevel>().map_err(|e| bad_request_error(&e)))
                    .collect::<FleetResult<_>>()?,
            ),
        };

        Ok(FleetFilters {
            depot: DepotSelection::from_option(self.depot.as_deref()),
            risk_levels,
            search: self.search,
        })
    }
}

// Response con las filas filtradas
#[derive(Debug, Serialize)]
pub struct FleetVehiclesResponse {
    pub evaluated_at: chrono::NaiveDateTime,
    pub total: usize,
    pub vehicles: Vec<ClassifiedVehicle>,
}

// Response del selector de depósitos
#[derive(Debug, Serialize)]
pub struct DepotOptionsResponse {
    pub depots: Vec<String>,
}

// Response de las operaciones de cache
#[derive(Debug, Serialize)]
pub struct CacheStatusResponse {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CacheStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared_entries: Option<usize>,
}
