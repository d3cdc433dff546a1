//! Estado compartido de la aplicación
//!
//! Este módulo define el estado que se pasa a través del router de Axum.
//! Todo es inmutable después del arranque y se comparte con `Arc`.

use std::sync::Arc;

use crate::{
    config::environment::EnvironmentConfig,
    repositories::SubmissionStore,
    services::{auth_verifier::AuthVerifier, error_reporting::ErrorReporter},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub store: Arc<dyn SubmissionStore>,
    pub auth: Arc<dyn AuthVerifier>,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        store: Arc<dyn SubmissionStore>,
        auth: Arc<dyn AuthVerifier>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            auth,
            reporter,
        }
    }
}
