use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::posting_dto::{CreatePostingPayload, UpdatePostingPayload},
    dto::screening_dto::FilterPayload,
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/postings",
    request_body = CreatePostingPayload,
    responses(
        (status = 201, description = "Posting created successfully"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_posting(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let detail = state.posting_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    put,
    path = "/api/postings/{id}",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    request_body = UpdatePostingPayload,
    responses(
        (status = 200, description = "Posting updated successfully"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn update_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let detail = state.posting_service.update(id, payload).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/postings/{id}",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting found"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn get_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.posting_service.get(id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/postings/company/{companyId}",
    params(
        ("companyId" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company postings with application counts")
    )
)]
#[axum::debug_handler]
pub async fn list_company_postings(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let postings = state.posting_service.list_by_company(company_id).await?;
    Ok(Json(postings))
}

#[utoipa::path(
    post,
    path = "/api/postings/{id}/filter",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Applications partitioned into qualification tiers"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn filter_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FilterPayload>,
) -> Result<impl IntoResponse> {
    let response = state
        .screening_service
        .filter_applications(id, payload.requirements)
        .await?;
    Ok(Json(response))
}
