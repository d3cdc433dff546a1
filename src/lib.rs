//! Servicio de formularios del portal de personal
//!
//! Recibe los partes de accidente, movimientos de autobús, mensajes de
//! contacto e informes MID del portal, los valida y los guarda a nombre
//! del usuario autenticado.

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
pub mod utils;
