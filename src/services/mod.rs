//! Services module
//!
//! Este módulo contiene la lógica de negocio del pipeline de flota:
//! generación sintética, derivación de métricas, clasificación de riesgo
//! y las vistas filtradas del dashboard.

pub mod feature_deriver;
pub mod fleet_filter;
pub mod fleet_generator;
pub mod fleet_service;
pub mod risk_classifier;

pub use fleet_filter::{DepotSelection, FleetFilters};
pub use fleet_generator::{FleetGenerator, GeneratorConfig};
pub use fleet_service::FleetService;
