use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use tracing::info;

use fleet_risk::config::EnvironmentConfig;
use fleet_risk::repositories::CsvFleetRepository;
use fleet_risk::services::FleetGenerator;

fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = EnvironmentConfig::from_env()?;
    info!(
        "🎲 Generando {} vehículos (semilla: {:?})",
        config.generator.count, config.generator.seed
    );

    let mut generator = FleetGenerator::new(config.generator.clone())?;
    let records = generator.generate(Local::now().date_naive());

    let repository = CsvFleetRepository::new(config.data_path.clone());
    let written = repository.write_records(&records)?;

    println!("Generated {} records in {}", written, repository.path().display());
    Ok(())
}
