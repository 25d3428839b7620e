mod common;

use http::StatusCode;
use serde_json::json;

use common::spawn_app;

async fn outsourced_phase(app: &common::TestApp, order_id: i64) -> i64 {
    let (status, body) = app
        .post(
            &format!("/api/v1/orders/{order_id}/phases"),
            json!({
                "subTaskKey": "gear_machining",
                "phaseName": "Machining",
                "subTaskName": "Gear machining",
                "processType": "outsourced",
                "stepNumber": 3,
                "vendorName": "Precision Works",
                "vendorContact": "+91 90000 11111"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn outward_challan_marks_phase_outsourced() {
    let app = spawn_app().await;
    let order_id = app.create_order("SO-CH-1").await;
    let tracking_id = outsourced_phase(&app, order_id).await;

    let (status, body) = app
        .post(
            "/api/v1/challans/outward",
            json!({
                "trackingId": tracking_id,
                "vendorName": "Precision Works",
                "expectedDeliveryDate": "2024-04-30"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    let challan_number = body["data"]["challanNumber"].as_str().unwrap();
    assert!(challan_number.starts_with("OC-"), "number: {challan_number}");
    assert_eq!(body["data"]["status"], "Issued");

    let (_, phase) = app.get(&format!("/api/v1/phases/{tracking_id}")).await;
    assert_eq!(phase["data"]["status"], "Outsourced");
    assert_eq!(phase["data"]["outwardChallanNo"], challan_number);
}

#[tokio::test]
async fn inward_challan_completes_the_phase() {
    let app = spawn_app().await;
    let order_id = app.create_order("SO-CH-2").await;
    let tracking_id = outsourced_phase(&app, order_id).await;

    let (_, outward) = app
        .post(
            "/api/v1/challans/outward",
            json!({"trackingId": tracking_id, "vendorName": "Precision Works"}),
        )
        .await;
    let outward_id = outward["data"]["id"].as_i64().unwrap();

    let (status, inward) = app
        .post(
            "/api/v1/challans/inward",
            json!({
                "outwardChallanId": outward_id,
                "qualityStatus": "accepted",
                "notes": "All gears within tolerance"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {inward}");
    let inward_number = inward["data"]["challanNumber"].as_str().unwrap();
    assert!(inward_number.starts_with("IC-"));
    assert_eq!(inward["data"]["status"], "Received");
    assert!(inward["data"]["receivedAt"].is_string());

    let (_, phase) = app.get(&format!("/api/v1/phases/{tracking_id}")).await;
    assert_eq!(phase["data"]["status"], "Completed");
    assert_eq!(phase["data"]["inwardChallanNo"], inward_number);
    assert!(phase["data"]["finishTime"].is_string());
}

#[tokio::test]
async fn challans_list_per_order_and_per_outward() {
    let app = spawn_app().await;
    let order_id = app.create_order("SO-CH-3").await;
    let tracking_id = outsourced_phase(&app, order_id).await;

    let (_, outward) = app
        .post(
            "/api/v1/challans/outward",
            json!({"trackingId": tracking_id, "vendorName": "Precision Works"}),
        )
        .await;
    let outward_id = outward["data"]["id"].as_i64().unwrap();

    app.post(
        "/api/v1/challans/inward",
        json!({"outwardChallanId": outward_id}),
    )
    .await;

    let (status, list) = app
        .get(&format!("/api/v1/orders/{order_id}/challans/outward"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["vendorName"], "Precision Works");

    let (status, inward_list) = app
        .get(&format!("/api/v1/challans/outward/{outward_id}/inward"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inward_list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn manual_corrections_update_challan_records() {
    let app = spawn_app().await;
    let order_id = app.create_order("SO-CH-4").await;
    let tracking_id = outsourced_phase(&app, order_id).await;

    let (_, outward) = app
        .post(
            "/api/v1/challans/outward",
            json!({"trackingId": tracking_id, "vendorName": "Precision Works"}),
        )
        .await;
    let outward_id = outward["data"]["id"].as_i64().unwrap();

    let (status, updated) = app
        .put(
            &format!("/api/v1/challans/outward/{outward_id}"),
            json!({"status": "In Transit"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "In Transit");

    let (_, inward) = app
        .post(
            "/api/v1/challans/inward",
            json!({"outwardChallanId": outward_id}),
        )
        .await;
    let inward_id = inward["data"]["id"].as_i64().unwrap();

    let (status, corrected) = app
        .put(
            &format!("/api/v1/challans/inward/{inward_id}"),
            json!({"qualityStatus": "rework", "notes": "Two gears out of spec"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(corrected["data"]["qualityStatus"], "rework");
    assert_eq!(corrected["data"]["notes"], "Two gears out of spec");
}

#[tokio::test]
async fn outward_challan_for_missing_tracking_is_not_found() {
    let app = spawn_app().await;

    let (status, _) = app
        .post(
            "/api/v1/challans/outward",
            json!({"trackingId": 555555, "vendorName": "Precision Works"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
