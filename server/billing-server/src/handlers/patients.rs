use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{ListQuery, NewPatient, Patient, PatientStats, PatientUpdate, Presented};

use crate::error::{api_list, api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::server::BillingServer;

/// Patients filtered by search text and status; counters follow the
/// configured aggregate policy
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(ListQuery),
    responses(
        (status = 200, description = "Patients with status badges", body = Vec<Patient>)
    ),
    tag = "patients"
)]
pub async fn list_patients(
    State(server): State<BillingServer>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Presented<Patient>>>> {
    let service = server.service.read().await;
    let rows = service.list_patients(&query);
    Json(api_list(rows, service.store().patients().len()))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/stats",
    responses(
        (status = 200, description = "Patient totals and average age", body = PatientStats)
    ),
    tag = "patients"
)]
pub async fn patient_stats(State(server): State<BillingServer>) -> Json<ApiResponse<PatientStats>> {
    Json(api_success(server.service.read().await.patient_stats()))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Invalid patient", body = ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn create_patient(
    State(server): State<BillingServer>,
    Json(input): Json<NewPatient>,
) -> Result<(StatusCode, Json<ApiResponse<Patient>>), ApiError> {
    let patient = server.service.write().await.create_patient(input)?;
    Ok((StatusCode::CREATED, Json(api_success(patient))))
}

#[utoipa::path(
    put,
    path = "/api/v1/patients/{id}",
    request_body = PatientUpdate,
    params(
        ("id" = String, Path, description = "Patient ID, e.g. PAC001")
    ),
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Invalid update", body = ApiErrorResponse),
        (status = 404, description = "Patient not found", body = ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn update_patient(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    let patient = server.service.write().await.update_patient(&id, update)?;
    Ok(Json(api_success(patient)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Deleted patient", body = Patient),
        (status = 404, description = "Patient not found", body = ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn delete_patient(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    let patient = server.service.write().await.delete_patient(&id)?;
    Ok(Json(api_success(patient)))
}
