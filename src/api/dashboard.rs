//! Handlers del dashboard de flota
//!
//! Cada petición filtra la tabla clasificada (memoizada) y devuelve filas,
//! KPIs, agrupaciones para gráficos o el CSV de descarga.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::dto::fleet_dto::{
    CacheStatusResponse, DepotOptionsResponse, FleetQuery, FleetVehiclesResponse,
};
use crate::models::analytics::{DashboardSummary, FleetCharts};
use crate::models::fleet_table::FleetTable;
use crate::repositories::CsvFleetRepository;
use crate::state::AppState;
use crate::utils::errors::FleetResult;

/// Crear router del dashboard
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/depots", get(get_depots))
        .route("/vehicles", get(get_vehicles))
        .route("/summary", get(get_summary))
        .route("/charts", get(get_charts))
        .route("/download", get(download_csv))
        .route("/cache/stats", get(get_cache_stats))
        .route("/cache/clear", post(clear_cache))
}

/// Nombre del fichero de descarga, sellado con la fecha
pub fn download_filename(date: NaiveDate) -> String {
    format!("fleet_data_{}.csv", date.format("%Y%m%d"))
}

fn filtered_table(state: &AppState, query: FleetQuery) -> FleetResult<FleetTable> {
    let filters = query.into_filters()?;
    let table = state.fleet.table()?;
    Ok(table.filter(&filters))
}

/// Opciones del selector de depósito
pub async fn get_depots(State(state): State<AppState>) -> FleetResult<Json<DepotOptionsResponse>> {
    let table = state.fleet.table()?;
    Ok(Json(DepotOptionsResponse {
        depots: table.depot_options(),
    }))
}

/// Filas que cumplen los filtros
pub async fn get_vehicles(
    State(state): State<AppState>,
    Query(query): Query<FleetQuery>,
) -> FleetResult<Json<FleetVehiclesResponse>> {
    let table = filtered_table(&state, query)?;
    Ok(Json(FleetVehiclesResponse {
        evaluated_at: table.evaluated_at,
        total: table.len(),
        vehicles: table.vehicles,
    }))
}

/// KPIs del subconjunto filtrado
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<FleetQuery>,
) -> FleetResult<Json<DashboardSummary>> {
    let table = filtered_table(&state, query)?;
    Ok(Json(table.summary()))
}

/// Agrupaciones para gráficos del subconjunto filtrado
pub async fn get_charts(
    State(state): State<AppState>,
    Query(query): Query<FleetQuery>,
) -> FleetResult<Json<FleetCharts>> {
    let table = filtered_table(&state, query)?;
    Ok(Json(table.charts()))
}

/// Descargar el subconjunto filtrado con el esquema del fichero de entrada
pub async fn download_csv(
    State(state): State<AppState>,
    Query(query): Query<FleetQuery>,
) -> FleetResult<impl IntoResponse> {
    let table = filtered_table(&state, query)?;
    let records: Vec<_> = table.iter().map(|v| v.record().clone()).collect();

    let mut body = Vec::new();
    let written = CsvFleetRepository::write_to(&mut body, &records)?;

    let filename = download_filename(Local::now().date_naive());
    info!("📥 Descarga de {} vehículos como {}", written, filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

/// Estadísticas del cache de flota
pub async fn get_cache_stats(State(state): State<AppState>) -> FleetResult<Json<CacheStatusResponse>> {
    let stats = state.fleet.cache_stats()?;
    Ok(Json(CacheStatusResponse {
        enabled: stats.is_some(),
        stats,
        cleared_entries: None,
    }))
}

/// Limpiar el cache de flota
pub async fn clear_cache(State(state): State<AppState>) -> FleetResult<Json<CacheStatusResponse>> {
    let cleared = state.fleet.clear_cache()?;
    let stats = state.fleet.cache_stats()?;
    Ok(Json(CacheStatusResponse {
        enabled: stats.is_some(),
        stats,
        cleared_entries: Some(cleared),
    }))
}
