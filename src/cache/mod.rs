//! Cache
//!
//! Este módulo contiene la memoización explícita del pipeline de flota.

pub mod cache_config;
pub mod fleet_cache;

pub use cache_config::CacheConfig;
pub use fleet_cache::{CacheStats, FleetCache};
