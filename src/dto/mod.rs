//! DTOs
//!
//! Este módulo contiene los tipos de entrada y salida de la API del dashboard.

pub mod fleet_dto;

pub use fleet_dto::*;
