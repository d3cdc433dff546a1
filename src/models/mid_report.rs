//! Modelo de MidReport
//!
//! Mapea la tabla `mids`. Si `follow_up_required` es verdadero,
//! `follow_up_details` siempre viene informado.

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
        "midNumber",
        "date",
        "incidentType",
        "description",
        "location",
        "actionsTaken",
        "followUpRequired",
    ],
    flags: &["followUpRequired"],
    conditionals: &[ConditionalRule {
        trigger: "followUpRequired",
        when: Trigger::Truthy,
        dependent: "followUpDetails",
        message: "Follow-up details are required when follow-up is needed",
    }],
};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MidReport {
    pub id: i64,
    pub staff_id: Uuid,
    pub mid_number: String,
    pub date: String,
    pub incident_type: String,
    pub description: String,
    pub location: String,
    pub people_involved: Option<String>,
    pub actions_taken: String,
    pub follow_up_required: bool,
    pub follow_up_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewMidReport {
    #[validate(length(max = 200))]
    pub mid_number: String,
    #[validate(length(max = 200))]
    pub date: String,
    #[validate(length(max = 200))]
    pub incident_type: String,
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(length(max = 5000))]
    pub people_involved: Option<String>,
    #[validate(length(max = 5000))]
    pub actions_taken: String,
    pub follow_up_required: bool,
    #[validate(length(max = 5000))]
    pub follow_up_details: Option<String>,
}

impl NewMidReport {
    pub fn from_fields(fields: &FieldReader<'_>) -> AppResult<Self> {
        Ok(Self {
            mid_number: fields.text("midNumber")?,
            date: fields.text("date")?,
            incident_type: fields.text("incidentType")?,
            description: fields.text("description")?,
            location: fields.text("location")?,
            people_involved: fields.optional_text("peopleInvolved")?,
            actions_taken: fields.text("actionsTaken")?,
            follow_up_required: fields.flag("followUpRequired"),
            follow_up_details: fields.optional_text("followUpDetails")?,
        })
    }

    pub fn into_record(self, id: i64, staff_id: Uuid, created_at: DateTime<Utc>) -> MidReport {
        MidReport {
            id,
            staff_id,
            mid_number: self.mid_number,
            date: self.date,
            incident_type: self.incident_type,
            description: self.description,
            location: self.location,
            people_involved: self.people_involved,
            actions_taken: self.actions_taken,
            follow_up_required: self.follow_up_required,
            follow_up_details: self.follow_up_details,
            created_at,
        }
    }
}
