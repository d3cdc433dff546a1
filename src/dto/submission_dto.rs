use serde::Serialize;

use crate::models::submission::FormKind;

/// Respuesta de un envío correcto
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

impl SubmissionReceipt {
    pub fn new(kind: FormKind, id: i64) -> Self {
        Self {
            success: true,
            id,
            message: kind.confirmation_message().to_string(),
        }
    }
}

/// Respuesta de `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}
