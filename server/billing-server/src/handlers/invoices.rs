use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{
    Invoice, InvoiceStats, InvoiceUpdate, ListQuery, NewInvoice, PaymentRecord, Presented,
};

use crate::error::{api_list, api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::server::BillingServer;

/// Invoices filtered by search text and payment status
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    params(ListQuery),
    responses(
        (status = 200, description = "Invoices with status badges", body = Vec<Invoice>)
    ),
    tag = "invoices"
)]
pub async fn list_invoices(
    State(server): State<BillingServer>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Presented<Invoice>>>> {
    let service = server.service.read().await;
    let rows = service.list_invoices(&query);
    Json(api_list(rows, service.store().invoices().len()))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/stats",
    responses(
        (status = 200, description = "Invoice totals by status", body = InvoiceStats)
    ),
    tag = "invoices"
)]
pub async fn invoice_stats(State(server): State<BillingServer>) -> Json<ApiResponse<InvoiceStats>> {
    Json(api_success(server.service.read().await.invoice_stats()))
}

/// Issue a pending invoice; a missing amount bills the surgery's final value
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body = NewInvoice,
    responses(
        (status = 201, description = "Invoice issued", body = Invoice),
        (status = 400, description = "Invalid invoice", body = ApiErrorResponse)
    ),
    tag = "invoices"
)]
pub async fn create_invoice(
    State(server): State<BillingServer>,
    Json(input): Json<NewInvoice>,
) -> Result<(StatusCode, Json<ApiResponse<Invoice>>), ApiError> {
    let invoice = server.service.write().await.create_invoice(input)?;
    Ok((StatusCode::CREATED, Json(api_success(invoice))))
}

#[utoipa::path(
    put,
    path = "/api/v1/invoices/{id}",
    request_body = InvoiceUpdate,
    params(
        ("id" = String, Path, description = "Invoice ID, e.g. FAT001")
    ),
    responses(
        (status = 200, description = "Invoice updated", body = Invoice),
        (status = 400, description = "Invalid update", body = ApiErrorResponse),
        (status = 404, description = "Invoice not found", body = ApiErrorResponse)
    ),
    tag = "invoices"
)]
pub async fn update_invoice(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
    Json(update): Json<InvoiceUpdate>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = server.service.write().await.update_invoice(&id, update)?;
    Ok(Json(api_success(invoice)))
}

#[utoipa::path(
    post,
    path = "/api/v1/invoices/{id}/payment",
    request_body = PaymentRecord,
    params(
        ("id" = String, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice settled", body = Invoice),
        (status = 400, description = "Invoice already paid or cancelled", body = ApiErrorResponse),
        (status = 404, description = "Invoice not found", body = ApiErrorResponse)
    ),
    tag = "invoices"
)]
pub async fn record_payment(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
    Json(payment): Json<PaymentRecord>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = server.service.write().await.record_payment(&id, payment)?;
    Ok(Json(api_success(invoice)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Deleted invoice", body = Invoice),
        (status = 404, description = "Invoice not found", body = ApiErrorResponse)
    ),
    tag = "invoices"
)]
pub async fn delete_invoice(
    State(server): State<BillingServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Invoice>>, ApiError> {
    let invoice = server.service.write().await.delete_invoice(&id)?;
    Ok(Json(api_success(invoice)))
}
