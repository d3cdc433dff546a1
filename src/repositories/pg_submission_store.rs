use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::{
        accident_report::AccidentReport,
        bus_movement::BusMovement,
        contact_message::ContactMessage,
        mid_report::MidReport,
        submission::{FormKind, NewSubmission, Submission},
    },
    repositories::submission_store::SubmissionStore,
    utils::errors::AppResult,
};

const INSERT_ACCIDENT_REPORT: &str = r#"
    INSERT INTO accident_reports (staff_id, date, time, location, description, vehicles_involved,
                                  injuries, injury_details, witnesses, driver_name, bus_number)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    RETURNING id
"#;

const INSERT_BUS_MOVEMENT: &str = r#"
    INSERT INTO bus_movements (staff_id, bus_number, driver_name, departure_location, arrival_location,
                               departure_time, arrival_time, status, passenger_count, notes)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id
"#;

const INSERT_CONTACT_MESSAGE: &str = r#"
    INSERT INTO contact_messages (staff_id, subject, message, department, priority)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

const INSERT_MID_REPORT: &str = r#"
    INSERT INTO mids (staff_id, mid_number, date, incident_type, description, location,
                      people_involved, actions_taken, follow_up_required, follow_up_details)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id
"#;

const SELECT_ACCIDENT_REPORTS: &str = r#"
    SELECT id, staff_id, date, time, location, description, vehicles_involved, injuries,
           injury_details, witnesses, driver_name, bus_number, created_at
    FROM accident_reports
    WHERE staff_id = $1
    ORDER BY created_at DESC, id DESC
    LIMIT $2
"#;

const SELECT_BUS_MOVEMENTS: &str = r#"
    SELECT id, staff_id, bus_number, driver_name, departure_location, arrival_location,
           departure_time, arrival_time, status, passenger_count, notes, created_at
    FROM bus_movements
    WHERE staff_id = $1
    ORDER BY created_at DESC, id DESC
    LIMIT $2
"#;

const SELECT_CONTACT_MESSAGES: &str = r#"
    SELECT id, staff_id, subject, message, department, priority, created_at
    FROM contact_messages
    WHERE staff_id = $1
    ORDER BY created_at DESC, id DESC
    LIMIT $2
"#;

const SELECT_MID_REPORTS: &str = r#"
    SELECT id, staff_id, mid_number, date, incident_type, description, location,
           people_involved, actions_taken, follow_up_required, follow_up_details, created_at
    FROM mids
    WHERE staff_id = $1
    ORDER BY created_at DESC, id DESC
    LIMIT $2
"#;

/// Store sobre PostgreSQL.
///
/// Cada operación toma una conexión del pool y la libera al salir del
/// scope, tanto en éxito como en error.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, staff_id: Uuid, submission: NewSubmission) -> AppResult<i64> {
        let kind = submission.kind();
        let mut conn = self.pool.acquire().await?;

        let (id,): (i64,) = match submission {
            NewSubmission::AccidentReport(r) => {
                sqlx::query_as(INSERT_ACCIDENT_REPORT)
                    .bind(staff_id)
                    .bind(r.date)
                    .bind(r.time)
                    .bind(r.location)
                    .bind(r.description)
                    .bind(r.vehicles_involved)
                    .bind(r.injuries)
                    .bind(r.injury_details)
                    .bind(r.witnesses)
                    .bind(r.driver_name)
                    .bind(r.bus_number)
                    .fetch_one(&mut *conn)
                    .await?
            }
            NewSubmission::BusMovement(r) => {
                sqlx::query_as(INSERT_BUS_MOVEMENT)
                    .bind(staff_id)
                    .bind(r.bus_number)
                    .bind(r.driver_name)
                    .bind(r.departure_location)
                    .bind(r.arrival_location)
                    .bind(r.departure_time)
                    .bind(r.arrival_time)
                    .bind(r.status.as_str())
                    .bind(r.passenger_count)
                    .bind(r.notes)
                    .fetch_one(&mut *conn)
                    .await?
            }
            NewSubmission::ContactMessage(r) => {
                sqlx::query_as(INSERT_CONTACT_MESSAGE)
                    .bind(staff_id)
                    .bind(r.subject)
                    .bind(r.message)
                    .bind(r.department)
                    .bind(r.priority)
                    .fetch_one(&mut *conn)
                    .await?
            }
            NewSubmission::MidReport(r) => {
                sqlx::query_as(INSERT_MID_REPORT)
                    .bind(staff_id)
                    .bind(r.mid_number)
                    .bind(r.date)
                    .bind(r.incident_type)
                    .bind(r.description)
                    .bind(r.location)
                    .bind(r.people_involved)
                    .bind(r.actions_taken)
                    .bind(r.follow_up_required)
                    .bind(r.follow_up_details)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };

        debug!(table = kind.table(), id, "💾 Registro insertado");
        Ok(id)
    }

    async fn list(&self, kind: FormKind, staff_id: Uuid, limit: i64) -> AppResult<Vec<Submission>> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<Submission> = match kind {
            FormKind::AccidentReport => sqlx::query_as::<_, AccidentReport>(SELECT_ACCIDENT_REPORTS)
                .bind(staff_id)
                .bind(limit)
                .fetch_all(&mut *conn)
                .await?
                .into_iter()
                .map(Submission::AccidentReport)
                .collect(),
            FormKind::BusMovement => sqlx::query_as::<_, BusMovement>(SELECT_BUS_MOVEMENTS)
                .bind(staff_id)
                .bind(limit)
                .fetch_all(&mut *conn)
                .await?
                .into_iter()
                .map(Submission::BusMovement)
                .collect(),
            FormKind::ContactMessage => sqlx::query_as::<_, ContactMessage>(SELECT_CONTACT_MESSAGES)
                .bind(staff_id)
                .bind(limit)
                .fetch_all(&mut *conn)
                .await?
                .into_iter()
                .map(Submission::ContactMessage)
                .collect(),
            FormKind::MidReport => sqlx::query_as::<_, MidReport>(SELECT_MID_REPORTS)
                .bind(staff_id)
                .bind(limit)
                .fetch_all(&mut *conn)
                .await?
                .into_iter()
                .map(Submission::MidReport)
                .collect(),
        };

        debug!(table = kind.table(), count = rows.len(), "📋 Registros recuperados");
        Ok(rows)
    }
}
