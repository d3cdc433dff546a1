//! Tipos compartidos por los cuatro formularios del portal
//!
//! `FormKind` identifica el formulario, `NewSubmission` es un registro ya
//! validado listo para insertar y `Submission` es una fila persistida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    accident_report::{AccidentReport, NewAccidentReport},
    bus_movement::{BusMovement, NewBusMovement},
    contact_message::{ContactMessage, NewContactMessage},
    mid_report::{MidReport, NewMidReport},
};

/// Máximo de registros devueltos por consulta de historial
pub const HISTORY_LIMIT: i64 = 50;

/// Tipo de formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    AccidentReport,
    BusMovement,
    ContactMessage,
    MidReport,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::AccidentReport,
        FormKind::BusMovement,
        FormKind::ContactMessage,
        FormKind::MidReport,
    ];

    /// Segmento de ruta en `/api/submissions/{slug}`
    pub fn slug(&self) -> &'static str {
        match self {
            FormKind::AccidentReport => "accident-reports",
            FormKind::BusMovement => "bus-movements",
            FormKind::ContactMessage => "contact-messages",
            FormKind::MidReport => "mid-reports",
        }
    }

    /// Ruta de envío que usa el front-end existente
    pub fn legacy_submit_path(&self) -> &'static str {
        match self {
            FormKind::AccidentReport => "/api/accident-report",
            FormKind::BusMovement => "/api/bus-movement",
            FormKind::ContactMessage => "/api/contact",
            FormKind::MidReport => "/api/mid-report",
        }
    }

    /// Ruta de historial que usa el front-end existente
    pub fn legacy_history_path(&self) -> &'static str {
        match self {
            FormKind::AccidentReport => "/api/reports/accidents",
            FormKind::BusMovement => "/api/reports/bus-movements",
            FormKind::ContactMessage => "/api/reports/contact",
            FormKind::MidReport => "/api/reports/mids",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            FormKind::AccidentReport => "accident_reports",
            FormKind::BusMovement => "bus_movements",
            FormKind::ContactMessage => "contact_messages",
            FormKind::MidReport => "mids",
        }
    }

    /// Mensaje de confirmación devuelto tras un envío correcto
    pub fn confirmation_message(&self) -> &'static str {
        match self {
            FormKind::AccidentReport => "Accident report saved successfully",
            FormKind::BusMovement => "Bus movement data saved successfully",
            FormKind::ContactMessage => "Your message has been sent successfully. We will respond soon.",
            FormKind::MidReport => "MID report saved successfully",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Registro validado y normalizado, todavía sin id ni propietario
#[derive(Debug, Clone)]
pub enum NewSubmission {
    AccidentReport(NewAccidentReport),
    BusMovement(NewBusMovement),
    ContactMessage(NewContactMessage),
    MidReport(NewMidReport),
}

impl NewSubmission {
    pub fn kind(&self) -> FormKind {
        match self {
            NewSubmission::AccidentReport(_) => FormKind::AccidentReport,
            NewSubmission::BusMovement(_) => FormKind::BusMovement,
            NewSubmission::ContactMessage(_) => FormKind::ContactMessage,
            NewSubmission::MidReport(_) => FormKind::MidReport,
        }
    }

    /// Materializar la fila con los campos asignados por el servidor
    pub fn into_record(self, id: i64, staff_id: Uuid, created_at: DateTime<Utc>) -> Submission {
        match self {
            NewSubmission::AccidentReport(r) => {
                Submission::AccidentReport(r.into_record(id, staff_id, created_at))
            }
            NewSubmission::BusMovement(r) => {
                Submission::BusMovement(r.into_record(id, staff_id, created_at))
            }
            NewSubmission::ContactMessage(r) => {
                Submission::ContactMessage(r.into_record(id, staff_id, created_at))
            }
            NewSubmission::MidReport(r) => {
                Submission::MidReport(r.into_record(id, staff_id, created_at))
            }
        }
    }
}

/// Fila persistida de cualquiera de los formularios
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Submission {
    AccidentReport(AccidentReport),
    BusMovement(BusMovement),
    ContactMessage(ContactMessage),
    MidReport(MidReport),
}

impl Submission {
    pub fn kind(&self) -> FormKind {
        match self {
            Submission::AccidentReport(_) => FormKind::AccidentReport,
            Submission::BusMovement(_) => FormKind::BusMovement,
            Submission::ContactMessage(_) => FormKind::ContactMessage,
            Submission::MidReport(_) => FormKind::MidReport,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Submission::AccidentReport(r) => r.id,
            Submission::BusMovement(r) => r.id,
            Submission::ContactMessage(r) => r.id,
            Submission::MidReport(r) => r.id,
        }
    }

    pub fn staff_id(&self) -> Uuid {
        match self {
            Submission::AccidentReport(r) => r.staff_id,
            Submission::BusMovement(r) => r.staff_id,
            Submission::ContactMessage(r) => r.staff_id,
            Submission::MidReport(r) => r.staff_id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Submission::AccidentReport(r) => r.created_at,
            Submission::BusMovement(r) => r.created_at,
            Submission::ContactMessage(r) => r.created_at,
            Submission::MidReport(r) => r.created_at,
        }
    }
}
