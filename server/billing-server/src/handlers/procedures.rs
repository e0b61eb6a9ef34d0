use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{
    ListQuery, NewProcedure, Presented, Procedure, ProcedureStats, ProcedureUpdate,
};

use crate::error::{api_list, api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::server::BillingServer;

/// Procedure catalogue filtered by search text and type
#[utoipa::path(
    get,
    path = "/api/v1/procedures",
    params(ListQuery),
    responses(
        (status = 200, description = "Procedures with row badges", body = Vec<Procedure>)
    ),
    tag = "procedures"
)]
pub async fn list_procedures(
    State(server): State<BillingServer>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Presented<Procedure>>>> {
    let service = server.service.read().await;
    let rows = service.list_procedures(&query);
    Json(api_list(rows, service.store().procedures().len()))
}

#[utoipa::path(
    get,
    path = "/api/v1/procedures/stats",
    responses(
        (status = 200, description = "Counts by procedure type", body = ProcedureStats)
    ),
    tag = "procedures"
)]
pub async fn procedure_stats(State(server): State<BillingServer>) -> Json<ApiResponse<ProcedureStats>> {
    Json(api_success(server.service.read().await.procedure_stats()))
}

#[utoipa::path(
    post,
    path = "/api/v1/procedures",
    request_body = NewProcedure,
    responses(
        (status = 201, description = "Procedure registered", body = Procedure),
        (status = 400, description = "Invalid procedure", body = ApiErrorResponse)
    ),
    tag = "procedures"
)]
pub async fn create_procedure(
    State(server): State<BillingServer>,
    Json(input): Json<NewProcedure>,
) -> Result<(StatusCode, Json<ApiResponse<Procedure>>), ApiError> {
    let procedure = server.service.write().await.create_procedure(input)?;
    Ok((StatusCode::CREATED, Json(api_success(procedure))))
}

#[utoipa::path(
    put,
    path = "/api/v1/procedures/{id}",
    request_body = ProcedureUpdate,
    params(
        ("id" = String, Path, description = "Procedure ID, e.g. PROC001")
    ),
    responses(
        (status = 200, description = "Procedure updated", body = Procedure),
        (status = 400, description = "Invalid update", body = ApiErrorResponse),
        (status = 404, description = "Procedure not found", body = ApiErrorResponse)
    ),
    tag = "procedures"
)]
pub async fn update_procedure(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
    Json(update): Json<ProcedureUpdate>,
) -> Result<Json<ApiResponse<Procedure>>, ApiError> {
    let procedure = server.service.write().await.update_procedure(&id, update)?;
    Ok(Json(api_success(procedure)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/procedures/{id}",
    params(
        ("id" = String, Path, description = "Procedure ID")
    ),
    responses(
        (status = 200, description = "Deleted procedure", body = Procedure),
        (status = 404, description = "Procedure not found", body = ApiErrorResponse)
    ),
    tag = "procedures"
)]
pub async fn delete_procedure(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Procedure>>, ApiError> {
    let procedure = server.service.write().await.delete_procedure(&id)?;
    Ok(Json(api_success(procedure)))
}
