//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y funcionalidades comunes.

pub mod errors;
