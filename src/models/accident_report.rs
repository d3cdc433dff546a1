//! Modelo de AccidentReport
//!
//! Mapea la tabla `accident_reports`. Fecha y hora se guardan tal como
//! las envía el formulario.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::{
    services::form_validator::{ConditionalRule, FieldReader, FormSchema, Trigger},
    utils::errors::AppResult,
};

pub const SCHEMA: FormSchema = FormSchema {
    required: &[
        "date",
        "time",
        "location",
        "description",
        "vehiclesInvolved",
        "injuries",
        "driverName",
        "busNumber",
    ],
    flags: &["injuries"],
    conditionals: &[ConditionalRule {
        trigger: "injuries",
        when: Trigger::Truthy,
        dependent: "injuryDetails",
        message: "Injury details are required when injuries are reported",
    }],
};

/// Fila de la tabla accident_reports
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccidentReport {
    pub id: i64,
    pub staff_id: Uuid,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub vehicles_involved: String,
    pub injuries: bool,
    pub injury_details: Option<String>,
    pub witnesses: Option<String>,
    pub driver_name: String,
    pub bus_number: String,
    pub created_at: DateTime<Utc>,
}

/// Reporte de accidente validado
#[derive(Debug, Clone, Validate)]
pub struct NewAccidentReport {
    #[validate(length(max = 200))]
    pub date: String,
    #[validate(length(max = 200))]
    pub time: String,
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(length(max = 5000))]
    pub vehicles_involved: String,
    pub injuries: bool,
    #[validate(length(max = 5000))]
    pub injury_details: Option<String>,
    #[validate(length(max = 5000))]
    pub witnesses: Option<String>,
    #[validate(length(max = 200))]
    pub driver_name: String,
    #[validate(length(max = 200))]
    pub bus_number: String,
}

impl NewAccidentReport {
    pub fn from_fields(fields: &FieldReader<'_>) -> AppResult<Self> {
        Ok(Self {
            date: fields.text("date")?,
            time: fields.text("time")?,
            location: fields.text("location")?,
            description: fields.text("description")?,
            vehicles_involved: fields.text("vehiclesInvolved")?,
            injuries: fields.flag("injuries"),
            injury_details: fields.optional_text("injuryDetails")?,
            witnesses: fields.optional_text("witnesses")?,
            driver_name: fields.text("driverName")?,
            bus_number: fields.text("busNumber")?,
        })
    }

    pub fn into_record(self, id: i64, staff_id: Uuid, created_at: DateTime<Utc>) -> AccidentReport {
        AccidentReport {
            id,
            staff_id,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            vehicles_involved: self.vehicles_involved,
            injuries: self.injuries,
            injury_details: self.injury_details,
            witnesses: self.witnesses,
            driver_name: self.driver_name,
            bus_number: self.bus_number,
            created_at,
        }
    }
}
