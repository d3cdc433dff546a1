use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::submission::{FormKind, NewSubmission, Submission},
    repositories::submission_store::SubmissionStore,
    utils::errors::AppResult,
};

/// Store en memoria para desarrollo local y tests.
///
/// No persiste entre reinicios. Cuenta las operaciones recibidas para que
/// los tests puedan comprobar qué requests llegaron a la persistencia.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Submission>>,
    next_id: AtomicUsize,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de operaciones (insert o list) ejecutadas
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Total de filas guardadas, de cualquier formulario y propietario
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, staff_id: Uuid, submission: NewSubmission) -> AppResult<i64> {
        self.operations.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        rows.push(submission.into_record(id, staff_id, Utc::now()));

        Ok(id)
    }

    async fn list(&self, kind: FormKind, staff_id: Uuid, limit: i64) -> AppResult<Vec<Submission>> {
        self.operations.fetch_add(1, Ordering::SeqCst);

        let rows = self.rows.read().await;
        let mut matching: Vec<Submission> = rows
            .iter()
            .filter(|row| row.kind() == kind && row.staff_id() == staff_id)
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        matching.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(matching)
    }
}
