use axum::{
    extract::{rejection::JsonRejection, State},
    middleware::from_fn_with_state,
    routing::{get, post, MethodRouter},
    Extension, Json, Router,
};
use serde_json::Value;

use crate::controllers::submission_controller::SubmissionController;
use crate::dto::submission_dto::SubmissionReceipt;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::submission::{FormKind, Submission};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de los cuatro formularios.
///
/// `POST|GET /api/submissions/{slug}` más los alias que usa el portal
/// actual. La autenticación se aplica sólo a los métodos registrados, así
/// que un método incorrecto responde 405 antes de mirar el token.
pub fn create_submission_router(state: &AppState) -> Router<AppState> {
    FormKind::ALL.iter().fold(Router::new(), |router, &kind| {
        router
            .route(
                &format!("/api/submissions/{}", kind.slug()),
                protected(state, submit_endpoint(kind).merge(history_endpoint(kind))),
            )
            .route(kind.legacy_submit_path(), protected(state, submit_endpoint(kind)))
            .route(kind.legacy_history_path(), protected(state, history_endpoint(kind)))
    })
}

fn protected(state: &AppState, methods: MethodRouter<AppState>) -> MethodRouter<AppState> {
    methods
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
        .fallback(method_not_allowed)
}

fn submit_endpoint(kind: FormKind) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>,
              Extension(user): Extension<AuthenticatedUser>,
              body: Result<Json<Value>, JsonRejection>| async move {
            submit_form(state, user, kind, body).await
        },
    )
}

fn history_endpoint(kind: FormKind) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Extension(user): Extension<AuthenticatedUser>| async move {
            list_submissions(state, user, kind).await
        },
    )
}

async fn submit_form(
    state: AppState,
    user: AuthenticatedUser,
    kind: FormKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Cuerpo de la petición rechazado");
        AppError::InvalidInput {
            message: "Request body must be valid JSON".to_string(),
            fields: Vec::new(),
        }
    })?;

    let controller = SubmissionController::new(&state);
    let receipt = controller.submit(&user, kind, &body).await?;
    Ok(Json(receipt))
}

async fn list_submissions(
    state: AppState,
    user: AuthenticatedUser,
    kind: FormKind,
) -> Result<Json<Vec<Submission>>, AppError> {
    let controller = SubmissionController::new(&state);
    let records = controller.history(&user, kind).await?;
    Ok(Json(records))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
