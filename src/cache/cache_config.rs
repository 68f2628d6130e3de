//! Configuración de cache
//!
//! Este módulo contiene la configuración para el cache de tablas de flota.

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Segundos que una tabla clasificada sigue vigente. 0 desactiva el cache.
    pub default_ttl: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: 3600, // 1 hora
            max_entries: 8,
        }
    }
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        self.default_ttl > 0 && self.max_entries > 0
    }
}
