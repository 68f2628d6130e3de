//! Servicio del pipeline de flota
//!
//! Carga → derivación de métricas → clasificación, con memoización opcional
//! a través de `FleetCache`.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::info;

use crate::cache::{CacheConfig, CacheStats, FleetCache};
use crate::models::fleet_table::FleetTable;
use crate::models::vehicle::{RiskLevel, VehicleRecord};
use crate::repositories::FleetRepository;
use crate::services::feature_deriver::derive_features;
use crate::services::risk_classifier::classify_fleet;
use crate::utils::errors::FleetResult;

pub struct FleetService {
    repository: Arc<dyn FleetRepository>,
    cache: Option<FleetCache>,
}

impl FleetService {
    /// Servicio sin memoización: cada llamada relee la fuente
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository, cache: None }
    }

    /// Servicio con memoización. Un TTL de 0 equivale a no cachear.
    pub fn with_cache(repository: Arc<dyn FleetRepository>, config: CacheConfig) -> Self {
        let cache = config.is_enabled().then(|| FleetCache::new(config));
        Self { repository, cache }
    }

    /// Derivar y clasificar registros ya cargados
    pub fn build_table(records: &[VehicleRecord], evaluated_at: NaiveDateTime) -> FleetTable {
        let enriched = derive_features(records, evaluated_at);
        FleetTable::new(evaluated_at, classify_fleet(enriched))
    }

    /// Tabla clasificada respecto al instante actual, memoizada si hay cache
    pub fn table(&self) -> FleetResult<Arc<FleetTable>> {
        let Some(cache) = &self.cache else {
            return self.table_at(Local::now().naive_local()).map(Arc::new);
        };

        let source = self.repository.source_name();
        let Some(fingerprint) = self.repository.fingerprint()? else {
            return self.table_at(Local::now().naive_local()).map(Arc::new);
        };

        if let Some(table) = cache.get(&source, &fingerprint)? {
            return Ok(table);
        }

        let table = Arc::new(self.table_at(Local::now().naive_local())?);
        cache.set(&source, fingerprint, Arc::clone(&table))?;
        Ok(table)
    }

    /// Tabla clasificada respecto a un instante dado, sin pasar por el cache
    pub fn table_at(&self, evaluated_at: NaiveDateTime) -> FleetResult<FleetTable> {
        let records = self.repository.load_records()?;
        let table = Self::build_table(&records, evaluated_at);

        info!(
            "📊 Flota clasificada desde {}: {} vehículos, {} en riesgo alto",
            self.repository.source_name(),
            table.len(),
            table.count_by_risk(RiskLevel::High)
        );
        Ok(table)
    }

    /// Precondición de arranque: la fuente debe existir
    pub fn ensure_source_available(&self) -> FleetResult<()> {
        self.repository.fingerprint().map(|_| ())
    }

    pub fn cache_stats(&self) -> FleetResult<Option<CacheStats>> {
        self.cache.as_ref().map(FleetCache::get_stats).transpose()
    }

    pub fn clear_cache(&self) -> FleetResult<usize> {
        match &self.cache {
            Some(cache) => cache.clear(),
            None => Ok(0),
        }
    }
}
