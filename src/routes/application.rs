use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created successfully"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .create(payload.posting_id, payload.applicant_id)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications/posting/{postingId}",
    params(
        ("postingId" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Applications for the posting")
    )
)]
#[axum::debug_handler]
pub async fn list_posting_applications(
    State(state): State<AppState>,
    Path(posting_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_by_posting(posting_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated successfully"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(application))
}
