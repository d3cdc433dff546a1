use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    models::submission::{FormKind, NewSubmission, Submission},
    utils::errors::AppResult,
};

/// Acceso a las tablas de formularios.
///
/// Cada llamada ejecuta exactamente una sentencia. `list` siempre filtra
/// por propietario y devuelve los registros más recientes primero.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insertar un registro validado y devolver su id
    async fn insert(&self, staff_id: Uuid, submission: NewSubmission) -> AppResult<i64>;

    /// Registros de `staff_id` para un formulario, como máximo `limit`
    async fn list(&self, kind: FormKind, staff_id: Uuid, limit: i64) -> AppResult<Vec<Submission>>;
}
