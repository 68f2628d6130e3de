//! Configuración de variables de entorno
//!
//! Todas las claves son opcionales: sin entorno se reproduce el
//! comportamiento de la demo (fichero `./data/fleet_data_large.csv`, 500
//! vehículos, cache de una hora).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::services::GeneratorConfig;
use crate::utils::errors::{FleetError, FleetResult};

pub const DEFAULT_DATA_PATH: &str = "./data/fleet_data_large.csv";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub cache: CacheConfig,
    /// `None` → CORS permisivo
    pub cors_origins: Option<Vec<String>>,
    pub generator: GeneratorConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            cache: CacheConfig::default(),
            cors_origins: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso
    pub fn from_env() -> FleetResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración desde cualquier fuente clave → valor
    pub fn from_lookup<F>(lookup: F) -> FleetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cache = CacheConfig {
            default_ttl: parse_or(value("FLEET_CACHE_TTL"), "FLEET_CACHE_TTL", defaults.cache.default_ttl)?,
            ..defaults.cache
        };

        let generator = GeneratorConfig {
            count: parse_or(value("FLEET_GENERATOR_COUNT"), "FLEET_GENERATOR_COUNT", defaults.generator.count)?,
            seed: value("FLEET_GENERATOR_SEED")
                .map(|raw| parse_value("FLEET_GENERATOR_SEED", &raw))
                .transpose()?,
            ..defaults.generator
        };

        Ok(Self {
            environment: value("ENVIRONMENT").unwrap_or(defaults.environment),
            host: value("HOST").unwrap_or(defaults.host),
            port: parse_or(value("PORT"), "PORT", defaults.port)?,
            data_path: value("FLEET_DATA_PATH").map(PathBuf::from).unwrap_or(defaults.data_path),
            cache,
            cors_origins: value("CORS_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            generator,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> FleetResult<T> {
    raw.parse()
        .map_err(|_| FleetError::Config(format!("{} must be a valid number, got '{}'", key, raw)))
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> FleetResult<T> {
    match raw {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FleetResult<EnvironmentConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache.default_ttl, 3600);
        assert_eq!(config.generator.count, 500);
        assert_eq!(config.generator.seed, None);
        assert!(config.cors_origins.is_none());
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("FLEET_DATA_PATH", "/tmp/fleet.csv"),
            ("FLEET_CACHE_TTL", "0"),
            ("FLEET_GENERATOR_COUNT", "25"),
            ("FLEET_GENERATOR_SEED", "99"),
            ("CORS_ORIGINS", "http://localhost:5173, https://demo.example"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.data_path, PathBuf::from("/tmp/fleet.csv"));
        assert!(!config.cache.is_enabled());
        assert_eq!(config.generator.count, 25);
        assert_eq!(config.generator.seed, Some(99));
        assert_eq!(
            config.cors_origins,
            Some(vec!["http://localhost:5173".to_string(), "https://demo.example".to_string()])
        );
    }

    #[test]
    fn test_malformed_number_is_config_error() {
        let result = config_from(&[("PORT", "eighty")]);
        assert!(matches!(result, Err(FleetError::Config(_))));
    }
}
