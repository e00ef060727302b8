use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    email::dispatch_registration_emails,
    error::AppError,
    registration::{Registration, Signature},
    state::AppState,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub name: String,
}

/// `POST /register`
///
/// Validation happens before any side effect; the registration is committed
/// once the store prepend returns. Email outcomes are awaited so no send is
/// left in flight, but they never change the response.
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(request) =
        payload.map_err(|_| AppError::Validation("Invalid JSON".to_string()))?;

    let registration = Registration::from_submission(&request.name, &request.email)?;
    let total = state.store.prepend(&registration).await?;

    info!("Registration {} stored, total {total}", registration.id);

    dispatch_registration_emails(
        state.mailer.as_ref(),
        &state.config,
        &registration,
        total,
    )
    .await;

    Ok(Json(RegisterResponse {
        id: registration.id,
        name: registration.name,
    }))
}

/// `GET /signatures`
///
/// Public wall of signatures: the stored collection projected through
/// [`Signature`], newest first.
pub async fn signatures_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Signature>>, AppError> {
    let registrations = state.store.all().await?;
    let signatures: Vec<Signature> = registrations.iter().map(Signature::from).collect();

    Ok(Json(signatures))
}

pub async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Wrong verb on a known route. The body stays JSON like every other
/// response on this surface.
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
