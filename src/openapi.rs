use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FabTrack API",
        version = "0.1.0",
        description = r#"
# FabTrack Sales Order Pipeline API

Tracks manufacturing sales orders through a fixed eight-step pipeline, from
client PO intake to delivery. The production-plan step carries a nested
phase workflow, and outsourced phases are handed to vendors through
outward/inward challans.

## Pipeline steps

`clientPO`, `salesOrder`, `designEngineering`, `materialRequirements`,
`productionPlan`, `qualityCheck`, `shipment`, `delivery`.

## Error handling

Errors use a consistent envelope with appropriate HTTP status codes:

```json
{
  "error": "Not Found",
  "message": "Sales order 7 not found",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "orders", description = "Sales order management"),
        (name = "steps", description = "Pipeline step details and trackers"),
        (name = "phases", description = "Production phase sub-workflow"),
        (name = "challans", description = "Vendor outsourcing challans")
    ),
    paths(
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::order_stats,
        crate::handlers::steps::list_steps,
        crate::handlers::steps::order_progress,
        crate::handlers::steps::submit_step,
        crate::handlers::steps::delete_step_detail,
        crate::handlers::steps::update_step_status,
        crate::handlers::steps::verify_po_number,
        crate::handlers::phases::save_phase,
        crate::handlers::phases::list_phases,
        crate::handlers::challans::create_outward_challan,
        crate::handlers::challans::create_inward_challan,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::ListQuery,
            crate::services::sales_orders::CreateOrderRequest,
            crate::services::sales_orders::OrderResponse,
            crate::services::sales_orders::OrderListResponse,
            crate::services::sales_orders::OrderStatsResponse,
            crate::services::step_tracker::UpdateStepStatusRequest,
            crate::services::step_tracker::AssignStepRequest,
            crate::services::step_tracker::AddStepNoteRequest,
            crate::services::step_tracker::StepTrackerResponse,
            crate::services::step_tracker::ProgressSummary,
            crate::services::step_tracker::StepListResponse,
            crate::services::step_details::ClientPoRequest,
            crate::services::step_details::ClientInfoRequest,
            crate::services::step_details::ProjectDetailsRequest,
            crate::services::step_details::PoVerificationResponse,
            crate::services::production_phases::SavePhaseRequest,
            crate::services::production_phases::EditPhaseRequest,
            crate::services::production_phases::PhaseTrackingResponse,
            crate::services::challans::CreateOutwardChallanRequest,
            crate::services::challans::CreateInwardChallanRequest,
            crate::services::challans::UpdateOutwardChallanRequest,
            crate::services::challans::UpdateInwardChallanRequest,
            crate::pipeline::steps::StepKey,
            crate::pipeline::steps::StepStatus,
            crate::pipeline::phases::PhaseStatus,
            crate::pipeline::phases::ProcessType,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_includes_core_paths() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("FabTrack"));
        assert!(json.contains("/api/v1/orders"));
        assert!(json.contains("/api/v1/challans/outward"));
    }
}
