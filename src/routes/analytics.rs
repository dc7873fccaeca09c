use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::analytics_dto::{CompletedApplicationsPayload, StatusQuery, TurnoverQuery},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/analytics/turnover/{companyId}",
    params(
        ("companyId" = Uuid, Path, description = "Company ID"),
        ("from" = Option<String>, Query, description = "Window start (YYYY-MM-DD), defaults to one year before the end"),
        ("to" = Option<String>, Query, description = "Window end (YYYY-MM-DD), defaults to today")
    ),
    responses(
        (status = 200, description = "Turnover rate over the window")
    )
)]
#[axum::debug_handler]
pub async fn get_turnover(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<TurnoverQuery>,
) -> Result<impl IntoResponse> {
    let turnover = state
        .analytics_service
        .get_turn_over(company_id, query.from, query.to)
        .await?;
    Ok(Json(turnover))
}

#[utoipa::path(
    get,
    path = "/api/analytics/applications/options/{companyId}",
    params(
        ("companyId" = Uuid, Path, description = "Company ID"),
        ("status" = Option<String>, Query, description = "Status filter; 'Completed' covers every terminal status")
    ),
    responses(
        (status = 200, description = "Distinct chart axes for the company's applications")
    )
)]
#[axum::debug_handler]
pub async fn application_options(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse> {
    let options = state
        .analytics_service
        .application_options(company_id, query.status.as_deref())
        .await?;
    Ok(Json(options))
}

#[utoipa::path(
    post,
    path = "/api/analytics/applications/completed/{companyId}",
    params(
        ("companyId" = Uuid, Path, description = "Company ID")
    ),
    request_body = CompletedApplicationsPayload,
    responses(
        (status = 200, description = "Monthly application counts for the selected axes")
    )
)]
#[axum::debug_handler]
pub async fn completed_applications(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CompletedApplicationsPayload>,
) -> Result<impl IntoResponse> {
    let series = state
        .analytics_service
        .completed_applications(company_id, &payload)
        .await?;
    Ok(Json(series))
}
