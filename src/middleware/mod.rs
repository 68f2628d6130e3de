//! Middleware
//!
//! Este módulo contiene las capas HTTP del dashboard.

pub mod cors;
