//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor, del fichero de flota,
//! del cache y del generador.

pub mod environment;

pub use environment::*;
