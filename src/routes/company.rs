use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company found"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.get(id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/employees",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Employees of the company")
    )
)]
#[axum::debug_handler]
pub async fn list_company_employees(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let employees = state.company_service.list_employees(id).await?;
    Ok(Json(employees))
}
