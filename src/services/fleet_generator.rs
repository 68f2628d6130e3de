//! Generador de flota sintética
//!
//! Produce registros de vehículo aleatorios para alimentar el dashboard
//! de demo.

use chrono::{Duration, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::models::vehicle::{VehicleRecord, DEPOTS};
use crate::utils::errors::{FleetError, FleetResult};
use crate::utils::validation::validate_not_empty;

pub const MILEAGE_RANGE_KM: (u32, u32) = (20_000, 150_000);
pub const ENGINE_HOURS_RANGE: (u32, u32) = (400, 3_000);
pub const FUEL_EFFICIENCY_RANGE: (f64, f64) = (5.0, 10.0);
pub const BREAKDOWN_MEAN: f64 = 1.2;
pub const SERVICE_WINDOW_MONTHS: u32 = 6;

/// Parámetros del generador
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeneratorConfig {
    #[validate(range(min = 1, max = 100000))]
    pub count: usize,

    #[validate(length(max = 8), custom = "validate_not_empty")]
    pub id_prefix: String,

    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 500,
            id_prefix: "T".to_string(),
            seed: None,
        }
    }
}

/// Generador de registros de flota
pub struct FleetGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    breakdowns: Poisson<f64>,
}

impl FleetGenerator {
    pub fn new(config: GeneratorConfig) -> FleetResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let breakdowns = Poisson::new(BREAKDOWN_MEAN)
            .map_err(|e| FleetError::Config(format!("invalid breakdown mean: {}", e)))?;

        Ok(Self { config, rng, breakdowns })
    }

    /// Identificador secuencial con relleno a tres dígitos (T001, T002, ...)
    pub fn vehicle_id(prefix: &str, index: usize) -> String {
        format!("{}{:03}", prefix, index)
    }

    /// Generar la flota completa con fechas relativas a `today`
    pub fn generate(&mut self, today: NaiveDate) -> Vec<VehicleRecord> {
        let window_start = today
            .checked_sub_months(Months::new(SERVICE_WINDOW_MONTHS))
            .unwrap_or(today - Duration::days(180));
        let window_days = (today - window_start).num_days();

        let records: Vec<VehicleRecord> = (1..=self.config.count)
            .map(|index| self.generate_one(index, window_start, window_days))
            .collect();

        info!("🚚 {} vehículos sintéticos generados", records.len());
        records
    }

    fn generate_one(&mut self, index: usize, window_start: NaiveDate, window_days: i64) -> VehicleRecord {
        let mileage_km = self.rng.gen_range(MILEAGE_RANGE_KM.0..=MILEAGE_RANGE_KM.1);
        let engine_hours = self.rng.gen_range(ENGINE_HOURS_RANGE.0..=ENGINE_HOURS_RANGE.1);
        let last_service_date = window_start + Duration::days(self.rng.gen_range(0..=window_days));
        let breakdowns_last_6m = self.breakdowns.sample(&mut self.rng) as u32;
        let depot = DEPOTS.choose(&mut self.rng).copied().unwrap_or(DEPOTS[0]);
        let fuel_efficiency = round_one_decimal(
            self.rng.gen_range(FUEL_EFFICIENCY_RANGE.0..=FUEL_EFFICIENCY_RANGE.1),
        );

        VehicleRecord {
            vehicle_id: Self::vehicle_id(&self.config.id_prefix, index),
            mileage_km,
            engine_hours,
            last_service_date: Some(last_service_date),
            breakdowns_last_6m,
            fuel_efficiency,
            depot: depot.to_string(),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
