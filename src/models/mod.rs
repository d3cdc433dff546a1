//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de los formularios del portal.

pub mod submission;
pub mod accident_report;
pub mod bus_movement;
pub mod contact_message;
pub mod mid_report;
