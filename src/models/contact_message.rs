//! Modelo de ContactMessage (mensajes internos al personal de oficina)

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::{
    services::form_validator::{FieldReader, FormSchema},
    utils::errors::AppResult,
};

pub const SCHEMA: FormSchema = FormSchema {
    required: &["subject", "message", "department", "priority"],
    flags: &[],
    conditionals: &[],
};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub staff_id: Uuid,
    pub subject: String,
    pub message: String,
    pub department: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewContactMessage {
    #[validate(length(max = 200))]
    pub subject: String,
    #[validate(length(max = 5000))]
    pub message: String,
    #[validate(length(max = 200))]
    pub department: String,
    #[validate(length(max = 200))]
    pub priority: String,
}

impl NewContactMessage {
    pub fn from_fields(fields: &FieldReader<'_>) -> AppResult<Self> {
        Ok(Self {
            subject: fields.text("subject")?,
            message: fields.text("message")?,
            department: fields.text("department")?,
            priority: fields.text("priority")?,
        })
    }

    pub fn into_record(self, id: i64, staff_id: Uuid, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            staff_id,
            subject: self.subject,
            message: self.message,
            department: self.department,
            priority: self.priority,
            created_at,
        }
    }
}
