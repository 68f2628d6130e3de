//! Dashboard de riesgo de mantenimiento de flota
//!
//! Carga la telemetría de vehículos, deriva métricas de servicio y averías,
//! clasifica cada vehículo en un nivel de riesgo y expone vistas filtradas
//! para el dashboard.

pub mod api;
pub mod cache;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
