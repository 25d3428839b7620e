mod common;

use http::StatusCode;
use serde_json::json;

use common::spawn_app;

fn welding_phase() -> serde_json::Value {
    json!({
        "subTaskKey": "structural_welding",
        "phaseName": "Fabrication",
        "subTaskName": "Structural welding",
        "processType": "inhouse",
        "stepNumber": 2,
        "welderId": "W-12",
        "measurements": "6m girder, double fillet"
    })
}

#[tokio::test]
async fn first_save_seeds_tracking_in_not_started() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-1").await;

    let (status, body) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["data"]["status"], "Not Started");
    assert_eq!(body["data"]["subTaskKey"], "structural_welding");
    assert_eq!(body["data"]["processType"], "inhouse");
    assert!(body["data"]["startTime"].is_null());
    assert_eq!(body["data"]["detail"]["welderId"], "W-12");
}

#[tokio::test]
async fn resaving_updates_detail_without_resetting_lifecycle() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-2").await;

    let (_, saved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    let tracking_id = saved["data"]["id"].as_i64().unwrap();

    app.post(&format!("/api/v1/phases/{tracking_id}/start"), json!({}))
        .await;

    let (_, resaved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    assert_eq!(resaved["data"]["id"], tracking_id);
    assert_eq!(resaved["data"]["status"], "In Progress");
}

#[tokio::test]
async fn start_and_finish_stamp_times() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-3").await;

    let (_, saved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    let tracking_id = saved["data"]["id"].as_i64().unwrap();

    let (status, started) = app
        .post(&format!("/api/v1/phases/{tracking_id}/start"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["data"]["status"], "In Progress");
    let start_time = started["data"]["startTime"].as_str().unwrap().to_string();

    // A second start keeps the original start time
    let (_, restarted) = app
        .post(&format!("/api/v1/phases/{tracking_id}/start"), json!({}))
        .await;
    assert_eq!(restarted["data"]["startTime"], start_time.as_str());

    let (_, finished) = app
        .post(&format!("/api/v1/phases/{tracking_id}/finish"), json!({}))
        .await;
    assert_eq!(finished["data"]["status"], "Completed");
    assert!(finished["data"]["finishTime"].is_string());
}

#[tokio::test]
async fn starting_a_phase_records_the_assignee() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-7").await;

    let (_, saved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    let tracking_id = saved["data"]["id"].as_i64().unwrap();

    let (status, started) = app
        .post(
            &format!("/api/v1/phases/{tracking_id}/start"),
            json!({"assignee": "ravi"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {started}");
    assert_eq!(started["data"]["assignee"], "ravi");

    let (_, fetched) = app.get(&format!("/api/v1/phases/{tracking_id}")).await;
    assert_eq!(fetched["data"]["assignee"], "ravi");
    assert_eq!(fetched["data"]["status"], "In Progress");
}

#[tokio::test]
async fn hold_and_cancel_are_unguarded() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-4").await;

    let (_, saved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    let tracking_id = saved["data"]["id"].as_i64().unwrap();

    // Hold straight from Not Started
    let (_, held) = app
        .post(&format!("/api/v1/phases/{tracking_id}/hold"), json!({}))
        .await;
    assert_eq!(held["data"]["status"], "On Hold");

    // Cancel from On Hold
    let (_, cancelled) = app
        .post(&format!("/api/v1/phases/{tracking_id}/cancel"), json!({}))
        .await;
    assert_eq!(cancelled["data"]["status"], "Cancelled");
}

#[tokio::test]
async fn phases_list_in_step_order() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-5").await;

    app.post(
        &format!("/api/v1/orders/{id}/phases"),
        json!({
            "subTaskKey": "painting",
            "phaseName": "Finishing",
            "subTaskName": "Painting",
            "stepNumber": 5
        }),
    )
    .await;
    app.post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;

    let (status, body) = app.get(&format!("/api/v1/orders/{id}/phases")).await;
    assert_eq!(status, StatusCode::OK);
    let phases = body["data"].as_array().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0]["subTaskKey"], "structural_welding");
    assert_eq!(phases[1]["subTaskKey"], "painting");
    assert_eq!(phases[0]["detail"]["welderId"], "W-12");
}

#[tokio::test]
async fn edit_touches_only_the_provided_fields() {
    let app = spawn_app().await;
    let id = app.create_order("SO-PH-6").await;

    let (_, saved) = app
        .post(&format!("/api/v1/orders/{id}/phases"), welding_phase())
        .await;
    let tracking_id = saved["data"]["id"].as_i64().unwrap();

    let (status, edited) = app
        .put(
            &format!("/api/v1/phases/{tracking_id}"),
            json!({"tolerances": "+/- 0.5mm"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["data"]["detail"]["tolerances"], "+/- 0.5mm");
    assert_eq!(edited["data"]["detail"]["welderId"], "W-12");
}

#[tokio::test]
async fn lifecycle_on_missing_tracking_is_not_found() {
    let app = spawn_app().await;

    let (status, _) = app.post("/api/v1/phases/424242/start", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
