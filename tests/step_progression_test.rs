mod common;

use http::StatusCode;
use serde_json::json;

use common::spawn_app;

fn client_po_payload() -> serde_json::Value {
    json!({
        "poNumber": "PO-1001",
        "poDate": "2024-02-15",
        "clientName": "Acme Industries",
        "clientEmail": "buyer@acme.example",
        "clientPhone": "+91 98765 43210",
        "projectName": "Gantry crane",
        "projectCode": "GC-22"
    })
}

#[tokio::test]
async fn fresh_order_has_no_trackers_and_zero_progress() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-0").await;

    let (status, body) = app.get(&format!("/api/v1/orders/{id}/steps")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["steps"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["progress"]["totalSteps"], 8);
    assert_eq!(body["data"]["progress"]["trackedSteps"], 0);
    assert_eq!(body["data"]["progress"]["percentage"], 0);
}

#[tokio::test]
async fn submitting_a_detail_creates_the_tracker_in_progress() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-1").await;

    let (status, body) = app
        .post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["data"]["poNumber"], "PO-1001");

    let (status, tracker) = app
        .get(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracker["data"]["status"], "in_progress");
    assert_eq!(tracker["data"]["stepId"], 1);
    assert!(tracker["data"]["startedAt"].is_string());
    assert_eq!(tracker["data"]["data"]["poNumber"], "PO-1001");

    let (_, progress) = app.get(&format!("/api/v1/orders/{id}/progress")).await;
    assert_eq!(progress["data"]["trackedSteps"], 1);
    assert_eq!(progress["data"]["inProgressSteps"], 1);
}

#[tokio::test]
async fn unknown_step_key_is_a_bad_request() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-2").await;

    let (status, _) = app
        .post(&format!("/api/v1/orders/{id}/steps/paintShop"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completing_a_step_stamps_completed_at_once() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-3").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (status, body) = app
        .put(
            &format!("/api/v1/orders/{id}/steps/clientPO/status"),
            json!({"status": "completed"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let first_completed_at = body["data"]["completedAt"].as_str().unwrap().to_string();

    // Bounce through another status and complete again
    app.put(
        &format!("/api/v1/orders/{id}/steps/clientPO/status"),
        json!({"status": "in_progress"}),
    )
    .await;
    let (_, body) = app
        .put(
            &format!("/api/v1/orders/{id}/steps/clientPO/status"),
            json!({"status": "completed"}),
        )
        .await;

    assert_eq!(body["data"]["completedAt"], first_completed_at.as_str());
}

#[tokio::test]
async fn resubmitting_a_detail_reopens_a_completed_step() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-13").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (_, completed) = app
        .put(
            &format!("/api/v1/orders/{id}/steps/clientPO/status"),
            json!({"status": "completed"}),
        )
        .await;
    let completed_at = completed["data"]["completedAt"]
        .as_str()
        .unwrap()
        .to_string();

    let mut revised = client_po_payload();
    revised["clientName"] = json!("Acme Industries Ltd");
    let (status, _) = app
        .post(&format!("/api/v1/orders/{id}/steps/clientPO"), revised)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tracker) = app
        .get(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(tracker["data"]["status"], "in_progress");
    assert_eq!(tracker["data"]["data"]["clientName"], "Acme Industries Ltd");
    // The completion stamp survives the reopen
    assert_eq!(tracker["data"]["completedAt"], completed_at.as_str());
}

#[tokio::test]
async fn unknown_status_value_is_rejected() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-4").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (status, _) = app
        .put(
            &format!("/api/v1/orders/{id}/steps/clientPO/status"),
            json!({"status": "shipped"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_update_on_unstarted_step_is_not_found() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-5").await;

    let (status, _) = app
        .put(
            &format!("/api/v1/orders/{id}/steps/delivery/status"),
            json!({"status": "in_progress"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assignment_and_notes_accumulate_on_the_tracker() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-6").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (_, body) = app
        .post(
            &format!("/api/v1/orders/{id}/steps/clientPO/assign"),
            json!({"assignedTo": "priya"}),
        )
        .await;
    assert_eq!(body["data"]["assignedTo"], "priya");

    app.post(
        &format!("/api/v1/orders/{id}/steps/clientPO/notes"),
        json!({"note": "PO copy received"}),
    )
    .await;
    let (_, body) = app
        .post(
            &format!("/api/v1/orders/{id}/steps/clientPO/notes"),
            json!({"note": "Verified with client"}),
        )
        .await;
    assert_eq!(
        body["data"]["notes"],
        "PO copy received\nVerified with client"
    );

    let (status, _) = app
        .post(
            &format!("/api/v1/orders/{id}/steps/clientPO/notes"),
            json!({"note": "   "}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_detail_resets_the_tracker() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-7").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;
    app.post(
        &format!("/api/v1/orders/{id}/steps/clientPO/assign"),
        json!({"assignedTo": "priya"}),
    )
    .await;

    let (status, _) = app
        .delete(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tracker) = app
        .get(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(tracker["data"]["status"], "pending");
    assert!(tracker["data"]["data"].is_null());
    assert!(tracker["data"]["assignedTo"].is_null());

    let (status, _) = app
        .get(&format!("/api/v1/orders/{id}/steps/clientPO/detail"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again 404s: the detail is already gone
    let (status, _) = app
        .delete(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_info_slice_seeds_placeholders_on_fresh_order() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-8").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/orders/{id}/client-po/client-info"),
            json!({"poNumber": "PO-555", "clientName": "Acme"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["data"]["poNumber"], "PO-555");
    assert_eq!(body["data"]["clientEmail"], "TBD");

    let (_, details) = app
        .get(&format!("/api/v1/orders/{id}/client-po/project-details"))
        .await;
    assert_eq!(details["data"]["projectName"], "TBD");
    assert_eq!(details["data"]["projectCode"], "AUTO-GEN");

    // The slice write started the clientPO step
    let (_, tracker) = app
        .get(&format!("/api/v1/orders/{id}/steps/clientPO"))
        .await;
    assert_eq!(tracker["data"]["status"], "in_progress");
}

#[tokio::test]
async fn project_details_slice_updates_without_touching_identity() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-9").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (_, body) = app
        .put(
            &format!("/api/v1/orders/{id}/client-po/project-details"),
            json!({"projectName": "Gantry crane mk2", "billingAddress": "12 Mill Road"}),
        )
        .await;
    assert_eq!(body["data"]["projectName"], "Gantry crane mk2");
    assert_eq!(body["data"]["projectCode"], "GC-22");

    let (_, info) = app
        .get(&format!("/api/v1/orders/{id}/client-po/client-info"))
        .await;
    assert_eq!(info["data"]["poNumber"], "PO-1001");
}

#[tokio::test]
async fn po_number_verification() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-10").await;
    app.post(&format!("/api/v1/orders/{id}/steps/clientPO"), client_po_payload())
        .await;

    let (_, taken) = app.get("/api/v1/client-po/verify/PO-1001").await;
    assert_eq!(taken["data"]["exists"], true);

    let (_, free) = app.get("/api/v1/client-po/verify/PO-9999").await;
    assert_eq!(free["data"]["exists"], false);
    assert_eq!(free["data"]["poNumber"], "PO-9999");
}

#[tokio::test]
async fn material_submission_computes_total_cost() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-11").await;

    let (status, body) = app
        .post(
            &format!("/api/v1/orders/{id}/steps/materialRequirements"),
            json!({
                "materials": [
                    {"name": "MS Plate", "quantity": "10", "unit": "kg", "unitPrice": "2.5"},
                    {"name": "Wire rope", "quantity": "4", "unitPrice": "1.25"}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["data"]["procurementStatus"], "pending");
    let cost: f64 = body["data"]["totalMaterialCost"]
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .unwrap();
    assert!((cost - 30.0).abs() < f64::EPSILON, "cost: {cost}");
}

#[tokio::test]
async fn completing_every_step_reaches_full_progress() {
    let app = spawn_app().await;
    let id = app.create_order("SO-STEP-12").await;

    for key in [
        "clientPO",
        "salesOrder",
        "designEngineering",
        "materialRequirements",
        "productionPlan",
        "qualityCheck",
        "shipment",
        "delivery",
    ] {
        let payload = if key == "clientPO" {
            client_po_payload()
        } else {
            json!({})
        };
        let (status, body) = app
            .post(&format!("/api/v1/orders/{id}/steps/{key}"), payload)
            .await;
        assert_eq!(status, StatusCode::OK, "step {key}: {body}");

        let (status, _) = app
            .put(
                &format!("/api/v1/orders/{id}/steps/{key}/status"),
                json!({"status": "completed"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, progress) = app.get(&format!("/api/v1/orders/{id}/progress")).await;
    assert_eq!(progress["data"]["completedSteps"], 8);
    assert_eq!(progress["data"]["percentage"], 100);
    assert_eq!(progress["data"]["remainingSteps"], 0);
}
