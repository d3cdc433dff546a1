//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de campos y JWT.

pub mod errors;
pub mod validation;
pub mod jwt;
