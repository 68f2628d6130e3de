//! Cache de tablas de flota clasificadas
//!
//! Evita releer y reclasificar el fichero en cada interacción del dashboard.
//! Una entrada solo es válida mientras la huella de la fuente no cambie y no
//! haya superado el TTL.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::cache_config::CacheConfig;
use crate::models::fleet_table::FleetTable;
use crate::repositories::SourceFingerprint;
use crate::utils::errors::{internal_error, FleetResult};

/// Tabla en cache con metadatos
#[derive(Debug, Clone)]
struct CachedFleetTable {
    table: Arc<FleetTable>,
    fingerprint: SourceFingerprint,
    created_at: Instant,
}

/// Estadísticas del cache
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_created: u64,
    /// Entradas descartadas por TTL
    pub entries_expired: u64,
    /// Entradas descartadas porque la fuente cambió
    pub entries_invalidated: u64,
    /// Entradas descartadas por límite de tamaño
    pub entries_evicted: u64,
}

/// Cache en memoria de tablas clasificadas, indexado por fuente
pub struct FleetCache {
    memory_cache: RwLock<HashMap<String, CachedFleetTable>>,
    config: CacheConfig,
    stats: RwLock<CacheStats>,
}

impl FleetCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            memory_cache: RwLock::new(HashMap::new()),
            config,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// Obtener la tabla de una fuente si sigue siendo válida
    pub fn get(&self, source: &str, fingerprint: &SourceFingerprint) -> FleetResult<Option<Arc<FleetTable>>> {
        let mut cache = self.memory_cache.write().map_err(|_| internal_error("fleet cache lock poisoned"))?;
        let mut stats = self.stats.write().map_err(|_| internal_error("cache stats lock poisoned"))?;

        let Some(cached) = cache.get(source) else {
            stats.misses += 1;
            debug!("Cache miss para fuente: {}", source);
            return Ok(None);
        };

        if cached.fingerprint != *fingerprint {
            cache.remove(source);
            stats.entries_invalidated += 1;
            stats.misses += 1;
            debug!("Cache miss (fuente modificada) para: {}", source);
            return Ok(None);
        }

        if self.is_expired(cached.created_at) {
            cache.remove(source);
            stats.entries_expired += 1;
            stats.misses += 1;
            debug!("Cache miss (expirado) para: {}", source);
            return Ok(None);
        }

        stats.hits += 1;
        debug!("Cache hit para fuente: {}", source);
        Ok(Some(Arc::clone(&cached.table)))
    }

    /// Guardar la tabla de una fuente
    pub fn set(&self, source: &str, fingerprint: SourceFingerprint, table: Arc<FleetTable>) -> FleetResult<()> {
        let mut cache = self.memory_cache.write().map_err(|_| internal_error("fleet cache lock poisoned"))?;
        let mut stats = self.stats.write().map_err(|_| internal_error("cache stats lock poisoned"))?;

        if !cache.contains_key(source) && cache.len() >= self.config.max_entries {
            Self::evict_oldest(&mut cache, &mut stats);
        }

        cache.insert(
            source.to_string(),
            CachedFleetTable {
                table,
                fingerprint,
                created_at: Instant::now(),
            },
        );
        stats.entries_created += 1;

        debug!("Tabla guardada en cache para fuente: {}", source);
        Ok(())
    }

    /// Obtener estadísticas del cache
    pub fn get_stats(&self) -> FleetResult<CacheStats> {
        let stats = self.stats.read().map_err(|_| internal_error("cache stats lock poisoned"))?;
        Ok(stats.clone())
    }

    /// Obtener tamaño actual del cache
    pub fn size(&self) -> FleetResult<usize> {
        let cache = self.memory_cache.read().map_err(|_| internal_error("fleet cache lock poisoned"))?;
        Ok(cache.len())
    }

    /// Limpiar todo el cache
    pub fn clear(&self) -> FleetResult<usize> {
        let mut cache = self.memory_cache.write().map_err(|_| internal_error("fleet cache lock poisoned"))?;
        let removed = cache.len();
        cache.clear();
        info!("🧹 Cache de flota limpiado ({} entradas)", removed);
        Ok(removed)
    }

    fn is_expired(&self, created_at: Instant) -> bool {
        created_at.elapsed() >= Duration::from_secs(self.config.default_ttl)
    }

    fn evict_oldest(cache: &mut HashMap<String, CachedFleetTable>, stats: &mut CacheStats) {
        let oldest_key = cache
            .iter()
            .min_by_key(|(_, cached)| cached.created_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            cache.remove(&key);
            stats.entries_evicted += 1;
            debug!("Entrada más antigua eliminada: {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::time::SystemTime;

    fn table() -> Arc<FleetTable> {
        let evaluated_at = NaiveDateTime::parse_from_str("2024-06-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Arc::new(FleetTable::new(evaluated_at, Vec::new()))
    }

    fn fingerprint(len: u64) -> SourceFingerprint {
        SourceFingerprint {
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            len,
        }
    }

    fn cache(default_ttl: u64, max_entries: usize) -> FleetCache {
        FleetCache::new(CacheConfig { default_ttl, max_entries })
    }

    #[test]
    fn test_cache_basic_operations() {
        let cache = cache(3600, 4);

        assert!(cache.get("fleet.csv", &fingerprint(10)).unwrap().is_none());
        cache.set("fleet.csv", fingerprint(10), table()).unwrap();
        assert!(cache.get("fleet.csv", &fingerprint(10)).unwrap().is_some());

        let stats = cache.get_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries_created, 1);
        assert_eq!(cache.size().unwrap(), 1);
    }

    #[test]
    fn test_changed_fingerprint_invalidates() {
        let cache = cache(3600, 4);
        cache.set("fleet.csv", fingerprint(10), table()).unwrap();

        assert!(cache.get("fleet.csv", &fingerprint(11)).unwrap().is_none());
        assert_eq!(cache.size().unwrap(), 0);
        assert_eq!(cache.get_stats().unwrap().entries_invalidated, 1);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = cache(0, 4);
        cache.set("fleet.csv", fingerprint(10), table()).unwrap();

        assert!(cache.get("fleet.csv", &fingerprint(10)).unwrap().is_none());
        assert_eq!(cache.get_stats().unwrap().entries_expired, 1);
    }

    #[test]
    fn test_max_entries_evicts_oldest() {
        let cache = cache(3600, 2);
        cache.set("a.csv", fingerprint(1), table()).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        cache.set("b.csv", fingerprint(1), table()).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        cache.set("c.csv", fingerprint(1), table()).unwrap();

        assert_eq!(cache.size().unwrap(), 2);
        assert!(cache.get("a.csv", &fingerprint(1)).unwrap().is_none());
        assert!(cache.get("c.csv", &fingerprint(1)).unwrap().is_some());
        assert_eq!(cache.get_stats().unwrap().entries_evicted, 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = cache(3600, 4);
        cache.set("a.csv", fingerprint(1), table()).unwrap();
        cache.set("b.csv", fingerprint(1), table()).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.size().unwrap(), 0);
    }
}
