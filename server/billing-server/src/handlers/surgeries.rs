use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{ListQuery, NewSurgery, Presented, Surgery, SurgeryStats, SurgeryUpdate};

use crate::error::{api_list, api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::server::BillingServer;

/// Surgeries filtered by search text and status
#[utoipa::path(
    get,
    path = "/api/v1/surgeries",
    params(ListQuery),
    responses(
        (status = 200, description = "Surgeries with status and complexity badges", body = Vec<Surgery>)
    ),
    tag = "surgeries"
)]
pub async fn list_surgeries(
    State(server): State<BillingServer>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Presented<Surgery>>>> {
    let service = server.service.read().await;
    let rows = service.list_surgeries(&query);
    Json(api_list(rows, service.store().surgeries().len()))
}

#[utoipa::path(
    get,
    path = "/api/v1/surgeries/stats",
    responses(
        (status = 200, description = "Surgery totals", body = SurgeryStats)
    ),
    tag = "surgeries"
)]
pub async fn surgery_stats(State(server): State<BillingServer>) -> Json<ApiResponse<SurgeryStats>> {
    Json(api_success(server.service.read().await.surgery_stats()))
}

/// Schedule a surgery; multiplier and final value are computed server-side
#[utoipa::path(
    post,
    path = "/api/v1/surgeries",
    request_body = NewSurgery,
    responses(
        (status = 201, description = "Surgery scheduled", body = Surgery),
        (status = 400, description = "Invalid surgery", body = ApiErrorResponse)
    ),
    tag = "surgeries"
)]
pub async fn create_surgery(
    State(server): State<BillingServer>,
    Json(input): Json<NewSurgery>,
) -> Result<(StatusCode, Json<ApiResponse<Surgery>>), ApiError> {
    let surgery = server.service.write().await.create_surgery(input)?;
    Ok((StatusCode::CREATED, Json(api_success(surgery))))
}

#[utoipa::path(
    put,
    path = "/api/v1/surgeries/{id}",
    request_body = SurgeryUpdate,
    params(
        ("id" = String, Path, description = "Surgery ID, e.g. CIR001")
    ),
    responses(
        (status = 200, description = "Surgery updated", body = Surgery),
        (status = 400, description = "Invalid update", body = ApiErrorResponse),
        (status = 404, description = "Surgery not found", body = ApiErrorResponse)
    ),
    tag = "surgeries"
)]
pub async fn update_surgery(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
    Json(update): Json<SurgeryUpdate>,
) -> Result<Json<ApiResponse<Surgery>>, ApiError> {
    let surgery = server.service.write().await.update_surgery(&id, update)?;
    Ok(Json(api_success(surgery)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/surgeries/{id}",
    params(
        ("id" = String, Path, description = "Surgery ID")
    ),
    responses(
        (status = 200, description = "Deleted surgery", body = Surgery),
        (status = 404, description = "Surgery not found", body = ApiErrorResponse)
    ),
    tag = "surgeries"
)]
pub async fn delete_surgery(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Surgery>>, ApiError> {
    let surgery = server.service.write().await.delete_surgery(&id)?;
    Ok(Json(api_success(surgery)))
}
