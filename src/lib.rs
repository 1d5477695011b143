//! Fleet Management - backend de administración de flota
//!
//! Vehículos, conductores, viajes, mantenimientos, inventario y alertas
//! derivadas, expuestos por una API REST sobre un contenedor de estado en
//! memoria con persistencia PostgreSQL fire-and-forget.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
