//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::CsvFleetRepository;
use crate::services::FleetService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub fleet: Arc<FleetService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, fleet: FleetService) -> Self {
        Self {
            config,
            fleet: Arc::new(fleet),
        }
    }

    /// Estado estándar: fichero CSV configurado con memoización
    pub fn from_config(config: EnvironmentConfig) -> Self {
        let repository = Arc::new(CsvFleetRepository::new(config.data_path.clone()));
        let fleet = FleetService::with_cache(repository, config.cache.clone());
        Self::new(config, fleet)
    }
}
