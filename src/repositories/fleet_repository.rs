//! Repositorio de datos de flota
//!
//! Acceso al fichero tabular de flota. La lectura es tolerante con las
//! fechas y estricta con las columnas numéricas.

use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::models::vehicle::{VehicleRecord, FLEET_COLUMNS};
use crate::utils::errors::{FleetError, FleetResult};
use crate::utils::validation::parse_service_date;

/// Huella de la fuente: cambia cuando el fichero se reescribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub modified: SystemTime,
    pub len: u64,
}

/// Fuente de registros de flota
pub trait FleetRepository: Send + Sync {
    /// Cargar todos los registros, en el orden de la fuente
    fn load_records(&self) -> FleetResult<Vec<VehicleRecord>>;

    /// Huella actual de la fuente. `None` si la fuente no puede cachearse.
    fn fingerprint(&self) -> FleetResult<Option<SourceFingerprint>>;

    /// Nombre estable de la fuente, usado como clave de cache
    fn source_name(&self) -> String;
}

/// Fila cruda del CSV, antes de interpretar la fecha
#[derive(Debug, Deserialize)]
struct RawVehicleRow {
    vehicle_id: String,
    mileage_km: u32,
    engine_hours: u32,
    last_service_date: Option<String>,
    breakdowns_last_6m: u32,
    fuel_efficiency: f64,
    depot: String,
}

impl From<RawVehicleRow> for VehicleRecord {
    fn from(row: RawVehicleRow) -> Self {
        Self {
            last_service_date: parse_service_date(row.last_service_date.as_deref()),
            vehicle_id: row.vehicle_id,
            mileage_km: row.mileage_km,
            engine_hours: row.engine_hours,
            breakdowns_last_6m: row.breakdowns_last_6m,
            fuel_efficiency: row.fuel_efficiency,
            depot: row.depot,
        }
    }
}

/// Repositorio sobre un fichero CSV
#[derive(Debug, Clone)]
pub struct CsvFleetRepository {
    path: PathBuf,
}

impl CsvFleetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verificar la precondición de que el fichero existe
    pub fn ensure_exists(&self) -> FleetResult<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(FleetError::MissingFile {
                path: self.path.display().to_string(),
            })
        }
    }

    /// Leer registros desde cualquier lector CSV con cabecera
    pub fn load_from_reader<R: Read>(reader: R) -> FleetResult<Vec<VehicleRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<RawVehicleRow>() {
            records.push(VehicleRecord::from(result?));
        }

        Ok(records)
    }

    /// Escribir registros con la cabecera fija
    pub fn write_to<W: Write>(writer: W, records: &[VehicleRecord]) -> FleetResult<usize> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(FLEET_COLUMNS)?;
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;

        Ok(records.len())
    }

    /// Sobrescribir el fichero con los registros dados
    pub fn write_records(&self, records: &[VehicleRecord]) -> FleetResult<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let written = Self::write_to(BufWriter::new(file), records)?;

        info!("💾 {} registros escritos en {}", written, self.path.display());
        Ok(written)
    }
}

impl FleetRepository for CsvFleetRepository {
    fn load_records(&self) -> FleetResult<Vec<VehicleRecord>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FleetError::MissingFile {
                path: self.path.display().to_string(),
            },
            _ => FleetError::Io(e),
        })?;

        let records = Self::load_from_reader(BufReader::new(file))?;
        debug!("📂 {} registros leídos de {}", records.len(), self.path.display());
        Ok(records)
    }

    fn fingerprint(&self) -> FleetResult<Option<SourceFingerprint>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FleetError::MissingFile {
                    path: self.path.display().to_string(),
                })
            }
            Err(e) => return Err(FleetError::Io(e)),
        };

        Ok(metadata.modified().ok().map(|modified| SourceFingerprint {
            modified,
            len: metadata.len(),
        }))
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}
