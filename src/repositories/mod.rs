//! Repositorios
//!
//! Gateway de persistencia de los formularios: el trait `SubmissionStore`
//! y sus implementaciones PostgreSQL y en memoria.

pub mod submission_store;
pub mod pg_submission_store;
pub mod memory_store;

pub use memory_store::MemoryStore;
pub use pg_submission_store::PgSubmissionStore;
pub use submission_store::SubmissionStore;
