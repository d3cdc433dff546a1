//! Services module
//!
//! Lógica de negocio del portal: verificación de tokens, validación de
//! formularios y reporte de errores del lado servidor.

pub mod auth_verifier;
pub mod error_reporting;
pub mod form_validator;
