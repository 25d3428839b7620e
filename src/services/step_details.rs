use crate::{
    db::DbPool,
    entities::{
        client_po_detail, delivery_detail, design_engineering_detail,
        material_requirements_detail, production_plan_detail, quality_check_detail,
        sales_order::Entity as OrderEntity, sales_order_detail, shipment_detail,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{
        json_field, AttachmentMeta, BomLine, DesignDocument, InternalInfo, MaterialItem,
        PlanTimeline, ProductDetails, ProjectRequirements, QualityCompliance, TermsConditions,
        WarrantySupport,
    },
    pipeline::steps::{StepInfo, StepKey},
    services::step_tracker::{record_submission, reset_tracker},
    validation,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

/// Placeholder written into required columns when a partial slice update has
/// to seed the row before the client has supplied the real value.
pub const PLACEHOLDER_TBD: &str = "TBD";
pub const PLACEHOLDER_CODE: &str = "AUTO-GEN";

// ---------------------------------------------------------------------------
// Request DTOs, one per step flavor. Submissions are create-or-update: the
// row is keyed by sales_order_id alone.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPoRequest {
    pub po_number: String,
    pub po_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub project_name: String,
    pub project_code: String,
    pub client_company_name: Option<String>,
    pub client_address: Option<String>,
    pub client_gstin: Option<String>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
    pub po_value: Option<Decimal>,
    pub currency: Option<String>,
    pub terms_conditions: Option<TermsConditions>,
    #[serde(default)]
    pub attachments: Vec<AttachmentMeta>,
    pub project_requirements: Option<ProjectRequirements>,
    pub notes: Option<String>,
}

/// Partial slice: identity fields of the client PO.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoRequest {
    pub po_number: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
}

/// Partial slice: project identity and addresses.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsRequest {
    pub project_name: Option<String>,
    pub project_code: Option<String>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderDetailRequest {
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub estimated_end_date: Option<NaiveDate>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
    pub product_details: Option<ProductDetails>,
    pub quality_compliance: Option<QualityCompliance>,
    pub warranty_support: Option<WarrantySupport>,
    pub payment_terms: Option<String>,
    pub project_priority: Option<String>,
    pub total_amount: Option<Decimal>,
    pub project_code: Option<String>,
    pub internal_info: Option<InternalInfo>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignEngineeringRequest {
    #[serde(default)]
    pub documents: Vec<DesignDocument>,
    pub design_status: Option<String>,
    pub bom_data: Option<Vec<BomLine>>,
    pub drawings_3d: Option<Value>,
    pub specifications: Option<Value>,
    pub design_notes: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub approval_comments: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequirementsRequest {
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    pub total_material_cost: Option<Decimal>,
    pub procurement_status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlanRequest {
    pub timeline: Option<PlanTimeline>,
    pub selected_phases: Option<Value>,
    pub phase_details: Option<Value>,
    pub production_notes: Option<String>,
    pub estimated_completion_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheckRequest {
    pub quality_standards: Option<String>,
    pub welding_standards: Option<String>,
    pub surface_finish: Option<String>,
    pub mechanical_load_testing: Option<String>,
    pub electrical_compliance: Option<String>,
    pub documents_required: Option<String>,
    pub warranty_period: Option<String>,
    pub service_support: Option<String>,
    pub internal_project_owner: Option<String>,
    pub qc_status: Option<String>,
    pub inspected_by: Option<String>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub qc_report: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub delivery_schedule: Option<String>,
    pub packaging_info: Option<String>,
    pub dispatch_mode: Option<String>,
    pub installation_required: Option<String>,
    pub site_commissioning: Option<String>,
    pub marking: Option<String>,
    pub dismantling: Option<String>,
    pub packing: Option<String>,
    pub dispatch: Option<String>,
    pub shipment_method: Option<String>,
    pub carrier_name: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
    pub shipment_date: Option<DateTime<Utc>>,
    pub shipment_status: Option<String>,
    pub shipment_cost: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub actual_delivery_date: Option<NaiveDate>,
    pub customer_contact: Option<String>,
    pub installation_completed: Option<String>,
    pub site_commissioning_completed: Option<String>,
    pub warranty_terms_acceptance: Option<String>,
    pub completion_remarks: Option<String>,
    pub project_manager: Option<String>,
    pub production_supervisor: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub received_by: Option<String>,
    pub delivery_status: Option<String>,
    pub delivered_quantity: Option<i32>,
    pub recipient_signature_path: Option<String>,
    pub delivery_notes: Option<String>,
    pub pod_number: Option<String>,
    pub delivery_cost: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoVerificationResponse {
    pub po_number: String,
    pub exists: bool,
}

/// Sums quantity * unit price over the material lines, skipping lines that
/// are missing either value.
pub fn material_cost(materials: &[MaterialItem]) -> Decimal {
    materials
        .iter()
        .filter_map(|m| Some(m.quantity? * m.unit_price?))
        .sum()
}

/// Service for per-step detail records. Every submission persists the detail
/// row and records it against the step tracker in one transaction.
#[derive(Clone)]
pub struct StepDetailService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StepDetailService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn ensure_order_exists(&self, sales_order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        OrderEntity::find_by_id(sales_order_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Sales order {} not found", sales_order_id))
            })?;
        Ok(())
    }

    /// Dispatches a raw submission payload to the step's typed flavor.
    #[instrument(skip(self, payload), fields(step_key = step.key.as_ref()))]
    pub async fn submit(
        &self,
        sales_order_id: i32,
        step: &'static StepInfo,
        payload: Value,
    ) -> Result<Value, ServiceError> {
        match step.key {
            StepKey::ClientPo => {
                self.submit_client_po(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::SalesOrder => {
                self.submit_sales_order_detail(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::DesignEngineering => {
                self.submit_design_engineering(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::MaterialRequirements => {
                self.submit_material_requirements(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::ProductionPlan => {
                self.submit_production_plan(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::QualityCheck => {
                self.submit_quality_check(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::Shipment => {
                self.submit_shipment(sales_order_id, decode_request(payload)?)
                    .await
            }
            StepKey::Delivery => {
                self.submit_delivery(sales_order_id, decode_request(payload)?)
                    .await
            }
        }
    }

    /// Returns the persisted detail record for a step, or None when the step
    /// has no detail yet.
    #[instrument(skip(self), fields(step_key = step.key.as_ref()))]
    pub async fn get_detail(
        &self,
        sales_order_id: i32,
        step: &'static StepInfo,
    ) -> Result<Option<Value>, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;

        let snapshot = match step.key {
            StepKey::ClientPo => client_po_detail::Entity::find()
                .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("clientPO", &m)),
            StepKey::SalesOrder => sales_order_detail::Entity::find()
                .filter(sales_order_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("salesOrder", &m)),
            StepKey::DesignEngineering => design_engineering_detail::Entity::find()
                .filter(design_engineering_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("designEngineering", &m)),
            StepKey::MaterialRequirements => material_requirements_detail::Entity::find()
                .filter(material_requirements_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("materialRequirements", &m)),
            StepKey::ProductionPlan => production_plan_detail::Entity::find()
                .filter(production_plan_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("productionPlan", &m)),
            StepKey::QualityCheck => quality_check_detail::Entity::find()
                .filter(quality_check_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("qualityCheck", &m)),
            StepKey::Shipment => shipment_detail::Entity::find()
                .filter(shipment_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("shipment", &m)),
            StepKey::Delivery => delivery_detail::Entity::find()
                .filter(delivery_detail::Column::SalesOrderId.eq(sales_order_id))
                .one(db)
                .await?
                .map(|m| json_field::encode("delivery", &m)),
        };

        Ok(snapshot)
    }

    /// Deletes a step's detail record and resets its tracker to pending.
    #[instrument(skip(self), fields(step_key = step.key.as_ref()))]
    pub async fn delete_detail(
        &self,
        sales_order_id: i32,
        step: &'static StepInfo,
    ) -> Result<(), ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let deleted = match step.key {
            StepKey::ClientPo => {
                delete_row::<client_po_detail::Entity>(
                    &txn,
                    client_po_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::SalesOrder => {
                delete_row::<sales_order_detail::Entity>(
                    &txn,
                    sales_order_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::DesignEngineering => {
                delete_row::<design_engineering_detail::Entity>(
                    &txn,
                    design_engineering_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::MaterialRequirements => {
                delete_row::<material_requirements_detail::Entity>(
                    &txn,
                    material_requirements_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::ProductionPlan => {
                delete_row::<production_plan_detail::Entity>(
                    &txn,
                    production_plan_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::QualityCheck => {
                delete_row::<quality_check_detail::Entity>(
                    &txn,
                    quality_check_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::Shipment => {
                delete_row::<shipment_detail::Entity>(
                    &txn,
                    shipment_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
            StepKey::Delivery => {
                delete_row::<delivery_detail::Entity>(
                    &txn,
                    delivery_detail::Column::SalesOrderId,
                    sales_order_id,
                )
                .await?
            }
        };

        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "No {} detail for sales order {}",
                step.key.as_ref(),
                sales_order_id
            )));
        }

        reset_tracker(&txn, sales_order_id, step).await?;
        txn.commit().await?;

        info!(sales_order_id, step_key = step.key.as_ref(), "step detail deleted");
        self.event_sender
            .send(Event::StepReset {
                sales_order_id,
                step_key: step.key.as_ref().to_string(),
            })
            .await;

        Ok(())
    }

    // -- Client PO (step 1) -------------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn submit_client_po(
        &self,
        sales_order_id: i32,
        request: ClientPoRequest,
    ) -> Result<Value, ServiceError> {
        let outcome = validation::validate_client_po(&request);
        if !outcome.is_valid {
            warn!(sales_order_id, errors = ?outcome.errors, "client PO validation warnings");
        }

        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = client_po_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    po_number: Set(request.po_number),
                    po_date: Set(request.po_date),
                    client_name: Set(request.client_name),
                    client_email: Set(request.client_email),
                    client_phone: Set(request.client_phone),
                    project_name: Set(request.project_name),
                    project_code: Set(request.project_code),
                    client_company_name: Set(request.client_company_name),
                    client_address: Set(request.client_address),
                    client_gstin: Set(request.client_gstin),
                    billing_address: Set(request.billing_address),
                    shipping_address: Set(request.shipping_address),
                    po_value: Set(request.po_value),
                    currency: Set(request.currency.unwrap_or_else(|| "INR".to_string())),
                    terms_conditions: Set(request
                        .terms_conditions
                        .as_ref()
                        .map(|t| json_field::encode("termsConditions", t))),
                    attachments: Set(Some(json_field::encode("attachments", &request.attachments))),
                    project_requirements: Set(request
                        .project_requirements
                        .as_ref()
                        .map(|r| json_field::encode("projectRequirements", r))),
                    notes: Set(request.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                active.po_number = Set(request.po_number);
                active.po_date = Set(request.po_date);
                active.client_name = Set(request.client_name);
                active.client_email = Set(request.client_email);
                active.client_phone = Set(request.client_phone);
                active.project_name = Set(request.project_name);
                active.project_code = Set(request.project_code);
                active.client_company_name = Set(request.client_company_name);
                active.client_address = Set(request.client_address);
                active.client_gstin = Set(request.client_gstin);
                active.billing_address = Set(request.billing_address);
                active.shipping_address = Set(request.shipping_address);
                active.po_value = Set(request.po_value);
                active.currency = Set(request.currency.unwrap_or_else(|| "INR".to_string()));
                active.terms_conditions = Set(request
                    .terms_conditions
                    .as_ref()
                    .map(|t| json_field::encode("termsConditions", t)));
                active.attachments =
                    Set(Some(json_field::encode("attachments", &request.attachments)));
                active.project_requirements = Set(request
                    .project_requirements
                    .as_ref()
                    .map(|r| json_field::encode("projectRequirements", r)));
                active.notes = Set(request.notes);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("clientPO", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::ClientPo);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::ClientPo).await;
        Ok(snapshot)
    }

    /// Partial slice: PO identity fields. Seeds the row with placeholders
    /// when it does not exist yet.
    #[instrument(skip(self, request))]
    pub async fn update_client_info(
        &self,
        sales_order_id: i32,
        request: ClientInfoRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = client_po_detail::ActiveModel {
                    po_number: Set(request
                        .po_number
                        .unwrap_or_else(|| PLACEHOLDER_TBD.to_string())),
                    po_date: Set(request.po_date.unwrap_or_else(|| now.date_naive())),
                    client_name: Set(request
                        .client_name
                        .unwrap_or_else(|| PLACEHOLDER_TBD.to_string())),
                    client_email: Set(request
                        .client_email
                        .unwrap_or_else(|| PLACEHOLDER_TBD.to_string())),
                    client_phone: Set(request
                        .client_phone
                        .unwrap_or_else(|| PLACEHOLDER_TBD.to_string())),
                    ..seeded_client_po(sales_order_id, now)
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.clone().into_active_model();
                if let Some(po_number) = request.po_number {
                    active.po_number = Set(po_number);
                }
                if let Some(po_date) = request.po_date {
                    active.po_date = Set(po_date);
                }
                if let Some(client_name) = request.client_name {
                    active.client_name = Set(client_name);
                }
                if let Some(client_email) = request.client_email {
                    active.client_email = Set(client_email);
                }
                if let Some(client_phone) = request.client_phone {
                    active.client_phone = Set(client_phone);
                }
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("clientPO", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::ClientPo);
        record_submission(&txn, sales_order_id, step, snapshot).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::ClientPo).await;
        Ok(client_info_slice(&model))
    }

    /// Partial slice: project identity and addresses.
    #[instrument(skip(self, request))]
    pub async fn update_project_details(
        &self,
        sales_order_id: i32,
        request: ProjectDetailsRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let mut active = seeded_client_po(sales_order_id, now);
                active.project_name = Set(request
                    .project_name
                    .unwrap_or_else(|| PLACEHOLDER_TBD.to_string()));
                active.project_code = Set(request
                    .project_code
                    .unwrap_or_else(|| PLACEHOLDER_CODE.to_string()));
                active.billing_address = Set(request.billing_address);
                active.shipping_address = Set(request.shipping_address);
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                if let Some(project_name) = request.project_name {
                    active.project_name = Set(project_name);
                }
                if let Some(project_code) = request.project_code {
                    active.project_code = Set(project_code);
                }
                if let Some(billing_address) = request.billing_address {
                    active.billing_address = Set(Some(billing_address));
                }
                if let Some(shipping_address) = request.shipping_address {
                    active.shipping_address = Set(Some(shipping_address));
                }
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("clientPO", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::ClientPo);
        record_submission(&txn, sales_order_id, step, snapshot).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::ClientPo).await;
        Ok(project_details_slice(&model))
    }

    /// Partial slice: the free-form project requirements object.
    #[instrument(skip(self, request))]
    pub async fn update_project_requirements(
        &self,
        sales_order_id: i32,
        request: ProjectRequirements,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let requirements = json_field::encode("projectRequirements", &request);

        let existing = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let mut active = seeded_client_po(sales_order_id, now);
                active.project_requirements = Set(Some(requirements.clone()));
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                active.project_requirements = Set(Some(requirements.clone()));
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("clientPO", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::ClientPo);
        record_submission(&txn, sales_order_id, step, snapshot).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::ClientPo).await;
        Ok(requirements)
    }

    pub async fn get_client_info(
        &self,
        sales_order_id: i32,
    ) -> Result<Option<Value>, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let model = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(db)
            .await?;
        Ok(model.as_ref().map(client_info_slice))
    }

    pub async fn get_project_details(
        &self,
        sales_order_id: i32,
    ) -> Result<Option<Value>, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let model = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(db)
            .await?;
        Ok(model.as_ref().map(project_details_slice))
    }

    pub async fn get_project_requirements(
        &self,
        sales_order_id: i32,
    ) -> Result<Option<Value>, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let model = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(db)
            .await?;
        Ok(model.and_then(|m| m.project_requirements))
    }

    /// Checks whether a PO number is already registered on any order.
    #[instrument(skip(self))]
    pub async fn verify_po_number(
        &self,
        po_number: &str,
    ) -> Result<PoVerificationResponse, ServiceError> {
        let db = &*self.db_pool;
        let existing = client_po_detail::Entity::find()
            .filter(client_po_detail::Column::PoNumber.eq(po_number))
            .one(db)
            .await?;
        Ok(PoVerificationResponse {
            po_number: po_number.to_string(),
            exists: existing.is_some(),
        })
    }

    // -- Remaining step flavors ---------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn submit_sales_order_detail(
        &self,
        sales_order_id: i32,
        request: SalesOrderDetailRequest,
    ) -> Result<Value, ServiceError> {
        let outcome = validation::validate_sales_order_detail(&request);
        if !outcome.is_valid {
            warn!(sales_order_id, errors = ?outcome.errors, "sales order detail validation warnings");
        }

        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = sales_order_detail::Entity::find()
            .filter(sales_order_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let product_details = request
            .product_details
            .as_ref()
            .map(|p| json_field::encode("productDetails", p));
        let quality_compliance = request
            .quality_compliance
            .as_ref()
            .map(|q| json_field::encode("qualityCompliance", q));
        let warranty_support = request
            .warranty_support
            .as_ref()
            .map(|w| json_field::encode("warrantySupport", w));
        let internal_info = request
            .internal_info
            .as_ref()
            .map(|i| json_field::encode("internalInfo", i));

        let model = match existing {
            None => {
                let active = sales_order_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    client_email: Set(request.client_email),
                    client_phone: Set(request.client_phone),
                    estimated_end_date: Set(request.estimated_end_date),
                    billing_address: Set(request.billing_address),
                    shipping_address: Set(request.shipping_address),
                    product_details: Set(product_details),
                    quality_compliance: Set(quality_compliance),
                    warranty_support: Set(warranty_support),
                    payment_terms: Set(request.payment_terms),
                    project_priority: Set(request.project_priority),
                    total_amount: Set(request.total_amount),
                    project_code: Set(request.project_code),
                    internal_info: Set(internal_info),
                    special_instructions: Set(request.special_instructions),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                active.client_email = Set(request.client_email);
                active.client_phone = Set(request.client_phone);
                active.estimated_end_date = Set(request.estimated_end_date);
                active.billing_address = Set(request.billing_address);
                active.shipping_address = Set(request.shipping_address);
                active.product_details = Set(product_details);
                active.quality_compliance = Set(quality_compliance);
                active.warranty_support = Set(warranty_support);
                active.payment_terms = Set(request.payment_terms);
                active.project_priority = Set(request.project_priority);
                active.total_amount = Set(request.total_amount);
                active.project_code = Set(request.project_code);
                active.internal_info = Set(internal_info);
                active.special_instructions = Set(request.special_instructions);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("salesOrder", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::SalesOrder);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::SalesOrder).await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_design_engineering(
        &self,
        sales_order_id: i32,
        request: DesignEngineeringRequest,
    ) -> Result<Value, ServiceError> {
        let outcome = validation::validate_design_engineering(&request);
        if !outcome.is_valid {
            warn!(sales_order_id, errors = ?outcome.errors, "design engineering validation warnings");
        }

        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let documents = json_field::encode("documents", &request.documents);
        let bom_data = request
            .bom_data
            .as_ref()
            .map(|b| json_field::encode("bomData", b));

        let existing = design_engineering_detail::Entity::find()
            .filter(design_engineering_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = design_engineering_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    documents: Set(documents),
                    design_status: Set(request
                        .design_status
                        .unwrap_or_else(|| "draft".to_string())),
                    bom_data: Set(bom_data),
                    drawings_3d: Set(request.drawings_3d),
                    specifications: Set(request.specifications),
                    design_notes: Set(request.design_notes),
                    reviewed_by: Set(request.reviewed_by),
                    reviewed_at: Set(request.reviewed_at),
                    approval_comments: Set(request.approval_comments),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let design_status = model.design_status.clone();
                let mut active = model.into_active_model();
                active.documents = Set(documents);
                active.design_status =
                    Set(request.design_status.unwrap_or(design_status));
                active.bom_data = Set(bom_data);
                active.drawings_3d = Set(request.drawings_3d);
                active.specifications = Set(request.specifications);
                active.design_notes = Set(request.design_notes);
                active.reviewed_by = Set(request.reviewed_by);
                active.reviewed_at = Set(request.reviewed_at);
                active.approval_comments = Set(request.approval_comments);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("designEngineering", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::DesignEngineering);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::DesignEngineering)
            .await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_material_requirements(
        &self,
        sales_order_id: i32,
        request: MaterialRequirementsRequest,
    ) -> Result<Value, ServiceError> {
        let outcome = validation::validate_material_requirements(&request);
        if !outcome.is_valid {
            warn!(sales_order_id, errors = ?outcome.errors, "material requirements validation warnings");
        }

        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        // Derive the total from the lines when the client did not supply one
        let total_cost = request
            .total_material_cost
            .unwrap_or_else(|| material_cost(&request.materials));
        let materials = json_field::encode("materials", &request.materials);

        let existing = material_requirements_detail::Entity::find()
            .filter(material_requirements_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = material_requirements_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    materials: Set(materials),
                    total_material_cost: Set(Some(total_cost)),
                    procurement_status: Set(request
                        .procurement_status
                        .unwrap_or_else(|| "pending".to_string())),
                    notes: Set(request.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let procurement_status = model.procurement_status.clone();
                let mut active = model.into_active_model();
                active.materials = Set(materials);
                active.total_material_cost = Set(Some(total_cost));
                active.procurement_status =
                    Set(request.procurement_status.unwrap_or(procurement_status));
                active.notes = Set(request.notes);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("materialRequirements", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::MaterialRequirements);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::MaterialRequirements)
            .await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_production_plan(
        &self,
        sales_order_id: i32,
        request: ProductionPlanRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let timeline = request
            .timeline
            .as_ref()
            .map(|t| json_field::encode("timeline", t));

        let existing = production_plan_detail::Entity::find()
            .filter(production_plan_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = production_plan_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    timeline: Set(timeline),
                    selected_phases: Set(request.selected_phases),
                    phase_details: Set(request.phase_details),
                    production_notes: Set(request.production_notes),
                    estimated_completion_date: Set(request.estimated_completion_date),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                active.timeline = Set(timeline);
                active.selected_phases = Set(request.selected_phases);
                active.phase_details = Set(request.phase_details);
                active.production_notes = Set(request.production_notes);
                active.estimated_completion_date = Set(request.estimated_completion_date);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("productionPlan", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::ProductionPlan);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::ProductionPlan)
            .await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_quality_check(
        &self,
        sales_order_id: i32,
        request: QualityCheckRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = quality_check_detail::Entity::find()
            .filter(quality_check_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = quality_check_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    quality_standards: Set(request.quality_standards),
                    welding_standards: Set(request.welding_standards),
                    surface_finish: Set(request.surface_finish),
                    mechanical_load_testing: Set(request.mechanical_load_testing),
                    electrical_compliance: Set(request.electrical_compliance),
                    documents_required: Set(request.documents_required),
                    warranty_period: Set(request.warranty_period),
                    service_support: Set(request.service_support),
                    internal_project_owner: Set(request.internal_project_owner),
                    qc_status: Set(request.qc_status.unwrap_or_else(|| "pending".to_string())),
                    inspected_by: Set(request.inspected_by),
                    inspection_date: Set(request.inspection_date),
                    qc_report: Set(request.qc_report),
                    remarks: Set(request.remarks),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let qc_status = model.qc_status.clone();
                let mut active = model.into_active_model();
                active.quality_standards = Set(request.quality_standards);
                active.welding_standards = Set(request.welding_standards);
                active.surface_finish = Set(request.surface_finish);
                active.mechanical_load_testing = Set(request.mechanical_load_testing);
                active.electrical_compliance = Set(request.electrical_compliance);
                active.documents_required = Set(request.documents_required);
                active.warranty_period = Set(request.warranty_period);
                active.service_support = Set(request.service_support);
                active.internal_project_owner = Set(request.internal_project_owner);
                active.qc_status = Set(request.qc_status.unwrap_or(qc_status));
                active.inspected_by = Set(request.inspected_by);
                active.inspection_date = Set(request.inspection_date);
                active.qc_report = Set(request.qc_report);
                active.remarks = Set(request.remarks);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("qualityCheck", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::QualityCheck);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::QualityCheck)
            .await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_shipment(
        &self,
        sales_order_id: i32,
        request: ShipmentRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = shipment_detail::Entity::find()
            .filter(shipment_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = shipment_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    delivery_schedule: Set(request.delivery_schedule),
                    packaging_info: Set(request.packaging_info),
                    dispatch_mode: Set(request.dispatch_mode),
                    installation_required: Set(request.installation_required),
                    site_commissioning: Set(request.site_commissioning),
                    marking: Set(request.marking),
                    dismantling: Set(request.dismantling),
                    packing: Set(request.packing),
                    dispatch: Set(request.dispatch),
                    shipment_method: Set(request.shipment_method),
                    carrier_name: Set(request.carrier_name),
                    tracking_number: Set(request.tracking_number),
                    estimated_delivery_date: Set(request.estimated_delivery_date),
                    shipping_address: Set(request.shipping_address),
                    shipment_date: Set(request.shipment_date),
                    shipment_status: Set(request
                        .shipment_status
                        .unwrap_or_else(|| "pending".to_string())),
                    shipment_cost: Set(request.shipment_cost),
                    notes: Set(request.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let shipment_status = model.shipment_status.clone();
                let mut active = model.into_active_model();
                active.delivery_schedule = Set(request.delivery_schedule);
                active.packaging_info = Set(request.packaging_info);
                active.dispatch_mode = Set(request.dispatch_mode);
                active.installation_required = Set(request.installation_required);
                active.site_commissioning = Set(request.site_commissioning);
                active.marking = Set(request.marking);
                active.dismantling = Set(request.dismantling);
                active.packing = Set(request.packing);
                active.dispatch = Set(request.dispatch);
                active.shipment_method = Set(request.shipment_method);
                active.carrier_name = Set(request.carrier_name);
                active.tracking_number = Set(request.tracking_number);
                active.estimated_delivery_date = Set(request.estimated_delivery_date);
                active.shipping_address = Set(request.shipping_address);
                active.shipment_date = Set(request.shipment_date);
                active.shipment_status = Set(request.shipment_status.unwrap_or(shipment_status));
                active.shipment_cost = Set(request.shipment_cost);
                active.notes = Set(request.notes);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("shipment", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::Shipment);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::Shipment).await;
        Ok(snapshot)
    }

    #[instrument(skip(self, request))]
    pub async fn submit_delivery(
        &self,
        sales_order_id: i32,
        request: DeliveryRequest,
    ) -> Result<Value, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let existing = delivery_detail::Entity::find()
            .filter(delivery_detail::Column::SalesOrderId.eq(sales_order_id))
            .one(&txn)
            .await?;

        let model = match existing {
            None => {
                let active = delivery_detail::ActiveModel {
                    sales_order_id: Set(sales_order_id),
                    actual_delivery_date: Set(request.actual_delivery_date),
                    customer_contact: Set(request.customer_contact),
                    installation_completed: Set(request.installation_completed),
                    site_commissioning_completed: Set(request.site_commissioning_completed),
                    warranty_terms_acceptance: Set(request.warranty_terms_acceptance),
                    completion_remarks: Set(request.completion_remarks),
                    project_manager: Set(request.project_manager),
                    production_supervisor: Set(request.production_supervisor),
                    delivery_date: Set(request.delivery_date),
                    received_by: Set(request.received_by),
                    delivery_status: Set(request
                        .delivery_status
                        .unwrap_or_else(|| "pending".to_string())),
                    delivered_quantity: Set(request.delivered_quantity),
                    recipient_signature_path: Set(request.recipient_signature_path),
                    delivery_notes: Set(request.delivery_notes),
                    pod_number: Set(request.pod_number),
                    delivery_cost: Set(request.delivery_cost),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let delivery_status = model.delivery_status.clone();
                let mut active = model.into_active_model();
                active.actual_delivery_date = Set(request.actual_delivery_date);
                active.customer_contact = Set(request.customer_contact);
                active.installation_completed = Set(request.installation_completed);
                active.site_commissioning_completed = Set(request.site_commissioning_completed);
                active.warranty_terms_acceptance = Set(request.warranty_terms_acceptance);
                active.completion_remarks = Set(request.completion_remarks);
                active.project_manager = Set(request.project_manager);
                active.production_supervisor = Set(request.production_supervisor);
                active.delivery_date = Set(request.delivery_date);
                active.received_by = Set(request.received_by);
                active.delivery_status = Set(request.delivery_status.unwrap_or(delivery_status));
                active.delivered_quantity = Set(request.delivered_quantity);
                active.recipient_signature_path = Set(request.recipient_signature_path);
                active.delivery_notes = Set(request.delivery_notes);
                active.pod_number = Set(request.pod_number);
                active.delivery_cost = Set(request.delivery_cost);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let snapshot = json_field::encode("delivery", &model);
        let step = crate::pipeline::steps::step_by_key(StepKey::Delivery);
        record_submission(&txn, sales_order_id, step, snapshot.clone()).await?;
        txn.commit().await?;

        self.emit_submitted(sales_order_id, StepKey::Delivery).await;
        Ok(snapshot)
    }

    async fn emit_submitted(&self, sales_order_id: i32, key: StepKey) {
        self.event_sender
            .send(Event::StepSubmitted {
                sales_order_id,
                step_key: key.as_ref().to_string(),
            })
            .await;
    }
}

fn decode_request<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, ServiceError> {
    serde_json::from_value(payload)
        .map_err(|e| ServiceError::BadRequest(format!("Malformed step payload: {}", e)))
}

/// A Client PO active model with every required column filled with
/// placeholders, ready for a slice update to overwrite its part.
fn seeded_client_po(sales_order_id: i32, now: DateTime<Utc>) -> client_po_detail::ActiveModel {
    client_po_detail::ActiveModel {
        sales_order_id: Set(sales_order_id),
        po_number: Set(PLACEHOLDER_TBD.to_string()),
        po_date: Set(now.date_naive()),
        client_name: Set(PLACEHOLDER_TBD.to_string()),
        client_email: Set(PLACEHOLDER_TBD.to_string()),
        client_phone: Set(PLACEHOLDER_TBD.to_string()),
        project_name: Set(PLACEHOLDER_TBD.to_string()),
        project_code: Set(PLACEHOLDER_CODE.to_string()),
        currency: Set("INR".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn client_info_slice(model: &client_po_detail::Model) -> Value {
    serde_json::json!({
        "poNumber": model.po_number,
        "poDate": model.po_date,
        "clientName": model.client_name,
        "clientEmail": model.client_email,
        "clientPhone": model.client_phone,
    })
}

fn project_details_slice(model: &client_po_detail::Model) -> Value {
    serde_json::json!({
        "projectName": model.project_name,
        "projectCode": model.project_code,
        "billingAddress": model.billing_address,
        "shippingAddress": model.shipping_address,
    })
}

async fn delete_row<E>(
    conn: &impl ConnectionTrait,
    order_column: E::Column,
    sales_order_id: i32,
) -> Result<bool, ServiceError>
where
    E: EntityTrait,
{
    let result = E::delete_many()
        .filter(order_column.eq(sales_order_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn material_cost_sums_priced_lines() {
        let materials = vec![
            MaterialItem {
                quantity: Some(dec!(10)),
                unit_price: Some(dec!(2.50)),
                ..Default::default()
            },
            MaterialItem {
                quantity: Some(dec!(3)),
                unit_price: None,
                ..Default::default()
            },
            MaterialItem {
                quantity: Some(dec!(4)),
                unit_price: Some(dec!(1.25)),
                ..Default::default()
            },
        ];
        assert_eq!(material_cost(&materials), dec!(30.00));
    }

    #[test]
    fn material_cost_of_empty_list_is_zero() {
        assert_eq!(material_cost(&[]), Decimal::ZERO);
    }

    #[test]
    fn step_payload_decode_rejects_wrong_shape() {
        let result: Result<ClientPoRequest, _> =
            decode_request(serde_json::json!({"poNumber": 42}));
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }
}
