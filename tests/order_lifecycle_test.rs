mod common;

use http::StatusCode;
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn create_and_fetch_order() {
    let app = spawn_app().await;

    let id = app.create_order("SO-2024-001").await;
    let (status, body) = app.get(&format!("/api/v1/orders/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["orderNumber"], "SO-2024-001");
    assert_eq!(body["data"]["customerName"], "Acme Industries");
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn create_order_rejects_blank_order_number() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/v1/orders",
            json!({"orderNumber": "", "customerName": "Acme"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
}

#[tokio::test]
async fn list_orders_paginates() {
    let app = spawn_app().await;

    for n in 1..=3 {
        app.create_order(&format!("SO-2024-00{n}")).await;
    }

    let (status, body) = app.get("/api/v1/orders?page=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["orders"].as_array().unwrap().len(), 2);

    let (_, page2) = app.get("/api/v1/orders?page=2&limit=2").await;
    assert_eq!(page2["data"]["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn stats_reflect_created_orders() {
    let app = spawn_app().await;

    app.create_order("SO-1").await;
    app.create_order("SO-2").await;

    let (status, body) = app.get("/api/v1/orders/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalOrders"], 2);
    assert_eq!(body["data"]["byStatus"]["active"], 2);
}

#[tokio::test]
async fn order_number_check_reports_existing_numbers() {
    let app = spawn_app().await;
    app.create_order("SO-UNIQUE-1").await;

    let (_, taken) = app.get("/api/v1/orders/check-number/SO-UNIQUE-1").await;
    assert_eq!(taken["data"]["exists"], true);

    let (_, free) = app.get("/api/v1/orders/check-number/SO-UNSEEN").await;
    assert_eq!(free["data"]["exists"], false);
}

#[tokio::test]
async fn delete_cascades_and_then_404s() {
    let app = spawn_app().await;
    let id = app.create_order("SO-DEL-1").await;

    // Leave some dependent rows behind to exercise the cascade
    let (status, _) = app
        .post(
            &format!("/api/v1/orders/{id}/steps/clientPO"),
            json!({
                "poNumber": "PO-77",
                "poDate": "2024-03-01",
                "clientName": "Acme",
                "clientEmail": "a@b.example",
                "clientPhone": "123",
                "projectName": "Crane",
                "projectCode": "CR-1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, phase) = app
        .post(
            &format!("/api/v1/orders/{id}/phases"),
            json!({
                "subTaskKey": "gear_machining",
                "phaseName": "Machining",
                "subTaskName": "Gear machining",
                "processType": "outsourced",
                "stepNumber": 1
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let tracking_id = phase["data"]["id"].as_i64().unwrap();

    let (status, outward) = app
        .post(
            "/api/v1/challans/outward",
            json!({"trackingId": tracking_id, "vendorName": "Precision Works"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let outward_id = outward["data"]["id"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/api/v1/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/orders/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Phase tracking rows go with the order
    let (status, _) = app.get(&format!("/api/v1/phases/{tracking_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // So do the challans issued against its phases
    let (status, _) = app
        .put(
            &format!("/api/v1/challans/outward/{outward_id}"),
            json!({"status": "Closed"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The step detail is gone with the rest; re-using its PO number is fine
    let (_, verify) = app.get("/api/v1/client-po/verify/PO-77").await;
    assert_eq!(verify["data"]["exists"], false);
}

#[tokio::test]
async fn missing_order_returns_not_found_envelope() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/v1/orders/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn health_endpoint_reports_database_up() {
    let app = spawn_app().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}
