//! Services module
//!
//! Este módulo contiene la lógica de negocio central: el coordinador de
//! ciclo de vida de estados y el motor de derivación de alertas. Ambos
//! operan sobre `FleetStore` como funciones explícitas, sin estado ambiente.

pub mod alerts;
pub mod lifecycle;
