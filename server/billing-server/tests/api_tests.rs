#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use billing_server::{create_app, BillingServer};
use billing_service::{AggregatePolicy, BillingService, BillingSettings};

/// Test configuration for API tests
struct TestConfig {
    app: Router,
}

impl TestConfig {
    fn new() -> Self {
        Self::with_policy(AggregatePolicy::Cached)
    }

    fn with_policy(aggregate_policy: AggregatePolicy) -> Self {
        let service = BillingService::seeded(BillingSettings {
            aggregate_policy,
            reference_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            recent_surgeries_limit: 3,
        })
        .expect("seeded service");
        Self {
            app: create_app(BillingServer::new(service)),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }
}

#[tokio::test]
async fn test_health_check() {
    let config = TestConfig::new();
    let (status, body) = config.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_dashboard_summary() {
    let config = TestConfig::new();
    let (status, body) = config.get("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["revenue"], "3000");
    assert_eq!(data["completedSurgeries"], 1);
    assert_eq!(data["activePatients"], 4);
    assert_eq!(data["pendingInvoices"], 2);
    let recent: Vec<&str> = data["recentSurgeries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["CIR004", "CIR003", "CIR002"]);
}

#[tokio::test]
async fn test_list_surgeries_with_search_and_filter() {
    let config = TestConfig::new();
    let (status, body) = config
        .get("/api/v1/surgeries?search=maria&filter=Agendada")
        .await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "CIR003");
    assert_eq!(rows[0]["badges"]["status"]["tone"], "bg-info/10 text-info");
    assert_eq!(body["metadata"]["total_count"], 4);
    assert_eq!(body["metadata"]["filtered_count"], 1);
}

#[tokio::test]
async fn test_list_procedures_by_type_key() {
    let config = TestConfig::new();
    let (_, body) = config.get("/api/v1/procedures?filter=consultation").await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "Consulta");
    assert_eq!(rows[0]["badges"]["kind"]["icon"], "stethoscope");
}

#[tokio::test]
async fn test_unknown_filter_returns_empty_list() {
    let config = TestConfig::new();
    let (status, body) = config.get("/api/v1/invoices?filter=Estornada").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invoice_stats() {
    let config = TestConfig::new();
    let (_, body) = config.get("/api/v1/invoices/stats").await;
    let stats = &body["data"];
    assert_eq!(stats["paidAmount"], "3000");
    assert_eq!(stats["pendingAmount"], "8700");
    assert_eq!(stats["overdueCount"], 1);
}

#[tokio::test]
async fn test_patient_stats_follow_aggregate_policy() {
    let cached = TestConfig::new();
    let (_, body) = cached.get("/api/v1/patients/stats").await;
    assert_eq!(body["data"]["totalRevenue"], "29600");
    assert_eq!(body["data"]["averageAge"], 44);

    let derived = TestConfig::with_policy(AggregatePolicy::Derived);
    let (_, body) = derived.get("/api/v1/patients/stats").await;
    assert_eq!(body["data"]["totalRevenue"], "26100");
}

#[tokio::test]
async fn test_create_surgery_computes_final_value() {
    let config = TestConfig::new();
    let (status, body) = config
        .send(
            "POST",
            "/api/v1/surgeries",
            Some(json!({
                "patientName": "Maria Fernandes",
                "patientId": "PAC004",
                "procedure": "Colecistectomia Laparoscópica",
                "surgeon": "Dr. Carlos Lima",
                "date": "2024-02-05",
                "time": "07:30",
                "complexity": "Alta",
                "baseValue": "8000",
                "room": "Centro Cirúrgico 1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "CIR005");
    assert_eq!(body["data"]["finalValue"], "14400");
    assert_eq!(body["data"]["status"], "Agendada");

    let (_, stats) = config.get("/api/v1/surgeries/stats").await;
    assert_eq!(stats["data"]["total"], 5);
    assert_eq!(stats["data"]["totalValue"], "40500");
}

#[tokio::test]
async fn test_oversized_money_is_bad_request() {
    let config = TestConfig::new();
    let (status, body) = config
        .send(
            "POST",
            "/api/v1/surgeries",
            Some(json!({
                "patientName": "Maria Fernandes",
                "patientId": "PAC004",
                "procedure": "Colecistectomia Laparoscópica",
                "surgeon": "Dr. Carlos Lima",
                "date": "2024-02-05",
                "time": "07:30",
                "complexity": "Alta",
                "baseValue": "79228162514264337593543950335",
                "room": "Centro Cirúrgico 1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");

    let (status, _) = config
        .send("PUT", "/api/v1/invoices/FAT002", Some(json!({ "amount": "39614081257132168796771975168" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, dashboard) = config.get("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["data"]["revenue"], "3000");
}

#[tokio::test]
async fn test_paid_invoice_cannot_be_reopened() {
    let config = TestConfig::new();
    let (status, _) = config
        .send("PUT", "/api/v1/invoices/FAT001", Some(json!({ "status": "Pendente" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = config.get("/api/v1/invoices?filter=Pago").await;
    let rows = list["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "FAT001");
    assert_eq!(rows[0]["paymentMethod"], "Cartão de Crédito");
}

#[tokio::test]
async fn test_blank_required_field_is_bad_request() {
    let config = TestConfig::new();
    let (status, body) = config
        .send(
            "POST",
            "/api/v1/procedures",
            Some(json!({
                "name": "  ",
                "type": "Exame",
                "category": "Diagnóstico",
                "code": "87.44",
                "complexity": "Baixa"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["error_id"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_record_payment_then_reject_second_payment() {
    let config = TestConfig::new();
    let payment = json!({ "paymentMethod": "PIX", "paymentDate": "2024-02-01" });

    let (status, body) = config
        .send("POST", "/api/v1/invoices/FAT003/payment", Some(payment.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Pago");
    assert_eq!(body["data"]["paymentMethod"], "PIX");

    let (status, _) = config
        .send("POST", "/api/v1/invoices/FAT003/payment", Some(payment))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, dashboard) = config.get("/api/v1/dashboard").await;
    assert_eq!(dashboard["data"]["revenue"], "6500");
    assert_eq!(dashboard["data"]["pendingInvoices"], 1);
}

#[tokio::test]
async fn test_update_and_delete_unknown_id_is_not_found() {
    let config = TestConfig::new();
    let (status, body) = config
        .send("PUT", "/api/v1/patients/PAC999", Some(json!({ "city": "Recife" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");

    let (status, _) = config.send("DELETE", "/api/v1/procedures/PROC999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_from_list() {
    let config = TestConfig::new();
    let (status, body) = config.send("DELETE", "/api/v1/patients/PAC001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "João Silva");

    let (_, list) = config.get("/api/v1/patients").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let config = TestConfig::new();
    let (status, body) = config.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Hospital Billing API");
    assert!(body["paths"]["/api/v1/invoices/{id}/payment"].is_object());
}
