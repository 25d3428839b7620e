use crate::{
    db::DbPool,
    entities::{
        production_phase_detail::{
            self, ActiveModel as PhaseDetailActiveModel, Entity as PhaseDetailEntity,
            Model as PhaseDetailModel,
        },
        production_phase_tracking::{
            self, ActiveModel as TrackingActiveModel, Entity as TrackingEntity,
            Model as TrackingModel,
        },
        sales_order::Entity as OrderEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{json_field, PhaseMaterialInfo},
    pipeline::phases::{PhaseStatus, ProcessType},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePhaseRequest {
    #[validate(length(min = 1, message = "Sub-task key is required"))]
    pub sub_task_key: String,
    #[validate(length(min = 1, message = "Phase name is required"))]
    pub phase_name: String,
    #[validate(length(min = 1, message = "Sub-task name is required"))]
    pub sub_task_name: String,
    #[serde(default)]
    pub process_type: ProcessType,
    pub step_number: Option<i32>,
    pub measurements: Option<String>,
    pub tolerances: Option<String>,
    pub equipment_specifications: Option<String>,
    pub assembly_done_by: Option<String>,
    pub done_by: Option<String>,
    pub motor_done_by: Option<String>,
    pub operator_name: Option<String>,
    pub painter_name: Option<String>,
    pub welder_id: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub material_info: Option<PhaseMaterialInfo>,
    pub specifications: Option<String>,
    pub notes: Option<String>,
}

/// Optional body for starting a phase; the assignee is recorded on the
/// tracking row when present.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartPhaseRequest {
    pub assignee: Option<String>,
}

/// Field-by-field correction of an already saved phase detail. Only the
/// fields present in the request are touched.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditPhaseRequest {
    pub measurements: Option<String>,
    pub tolerances: Option<String>,
    pub equipment_specifications: Option<String>,
    pub assembly_done_by: Option<String>,
    pub done_by: Option<String>,
    pub motor_done_by: Option<String>,
    pub operator_name: Option<String>,
    pub painter_name: Option<String>,
    pub welder_id: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub material_info: Option<PhaseMaterialInfo>,
    pub specifications: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTrackingResponse {
    pub id: i32,
    pub sales_order_id: i32,
    pub phase_detail_id: Option<i32>,
    pub sub_task_key: String,
    pub phase_name: String,
    pub sub_task_name: String,
    pub step_number: Option<i32>,
    pub process_type: String,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    pub finish_time: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
    pub outward_challan_no: Option<String>,
    pub inward_challan_no: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub detail: Option<PhaseDetailModel>,
}

impl PhaseTrackingResponse {
    fn from_models(tracking: TrackingModel, detail: Option<PhaseDetailModel>) -> Self {
        Self {
            id: tracking.id,
            sales_order_id: tracking.sales_order_id,
            phase_detail_id: tracking.phase_detail_id,
            sub_task_key: tracking.sub_task_key,
            phase_name: tracking.phase_name,
            sub_task_name: tracking.sub_task_name,
            step_number: tracking.step_number,
            process_type: tracking.process_type,
            status: tracking.status,
            start_time: tracking.start_time,
            finish_time: tracking.finish_time,
            assignee: tracking.assignee,
            outward_challan_no: tracking.outward_challan_no,
            inward_challan_no: tracking.inward_challan_no,
            detail,
        }
    }
}

/// Transitions a tracking row, used by this service and by the challan flow.
pub async fn transition_tracking<C: ConnectionTrait>(
    conn: &C,
    tracking: TrackingModel,
    status: PhaseStatus,
) -> Result<TrackingModel, ServiceError> {
    let now = Utc::now();
    let start_time = tracking.start_time;
    let finish_time = tracking.finish_time;

    let mut active = tracking.into_active_model();
    active.status = Set(status.as_ref().to_string());
    match status {
        PhaseStatus::InProgress => {
            active.start_time = Set(start_time.or(Some(now)));
        }
        PhaseStatus::Completed => {
            active.finish_time = Set(finish_time.or(Some(now)));
        }
        _ => {}
    }
    active.updated_at = Set(now);
    Ok(active.update(conn).await?)
}

/// Service for the production-phase sub-workflow nested under the
/// production-plan step.
#[derive(Clone)]
pub struct ProductionPhaseService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductionPhaseService {
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

    /// Fetches a tracking row by id, 404 when absent. Shared with the challan
    /// service.
    pub async fn find_tracking(&self, tracking_id: i32) -> Result<TrackingModel, ServiceError> {
        let db = &*self.db_pool;
        TrackingEntity::find_by_id(tracking_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Phase tracking {} not found", tracking_id))
            })
    }

    /// Creates or updates the phase detail for (order, sub-task). The first
    /// save also seeds the tracking row in "Not Started".
    #[instrument(skip(self, request), fields(sub_task_key = %request.sub_task_key))]
    pub async fn save_phase(
        &self,
        sales_order_id: i32,
        request: SavePhaseRequest,
    ) -> Result<PhaseTrackingResponse, ServiceError> {
        request.validate()?;
        self.ensure_order_exists(sales_order_id).await?;

        let db = &*self.db_pool;
        let txn = db.begin().await?;
        let now = Utc::now();

        let material_info = request
            .material_info
            .as_ref()
            .map(|m| json_field::encode("materialInfo", m));

        let existing = PhaseDetailEntity::find()
            .filter(production_phase_detail::Column::SalesOrderId.eq(sales_order_id))
            .filter(production_phase_detail::Column::SubTaskKey.eq(request.sub_task_key.clone()))
            .one(&txn)
            .await?;

        let detail = match existing {
            None => {
                let active = PhaseDetailActiveModel {
                    sales_order_id: Set(sales_order_id),
                    sub_task_key: Set(request.sub_task_key.clone()),
                    phase_name: Set(request.phase_name.clone()),
                    sub_task_name: Set(request.sub_task_name.clone()),
                    process_type: Set(request.process_type.as_ref().to_string()),
                    measurements: Set(request.measurements),
                    tolerances: Set(request.tolerances),
                    equipment_specifications: Set(request.equipment_specifications),
                    assembly_done_by: Set(request.assembly_done_by),
                    done_by: Set(request.done_by),
                    motor_done_by: Set(request.motor_done_by),
                    operator_name: Set(request.operator_name),
                    painter_name: Set(request.painter_name),
                    welder_id: Set(request.welder_id),
                    vendor_name: Set(request.vendor_name),
                    vendor_contact: Set(request.vendor_contact),
                    expected_delivery_date: Set(request.expected_delivery_date),
                    material_info: Set(material_info),
                    specifications: Set(request.specifications),
                    notes: Set(request.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                let mut active = model.into_active_model();
                active.phase_name = Set(request.phase_name.clone());
                active.sub_task_name = Set(request.sub_task_name.clone());
                active.process_type = Set(request.process_type.as_ref().to_string());
                active.measurements = Set(request.measurements);
                active.tolerances = Set(request.tolerances);
                active.equipment_specifications = Set(request.equipment_specifications);
                active.assembly_done_by = Set(request.assembly_done_by);
                active.done_by = Set(request.done_by);
                active.motor_done_by = Set(request.motor_done_by);
                active.operator_name = Set(request.operator_name);
                active.painter_name = Set(request.painter_name);
                active.welder_id = Set(request.welder_id);
                active.vendor_name = Set(request.vendor_name);
                active.vendor_contact = Set(request.vendor_contact);
                active.expected_delivery_date = Set(request.expected_delivery_date);
                active.material_info = Set(material_info);
                active.specifications = Set(request.specifications);
                active.notes = Set(request.notes);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        let tracking = TrackingEntity::find()
            .filter(production_phase_tracking::Column::SalesOrderId.eq(sales_order_id))
            .filter(production_phase_tracking::Column::SubTaskKey.eq(request.sub_task_key.clone()))
            .one(&txn)
            .await?;

        let tracking = match tracking {
            None => {
                let active = TrackingActiveModel {
                    sales_order_id: Set(sales_order_id),
                    phase_detail_id: Set(Some(detail.id)),
                    sub_task_key: Set(request.sub_task_key.clone()),
                    phase_name: Set(request.phase_name),
                    sub_task_name: Set(request.sub_task_name),
                    step_number: Set(request.step_number),
                    process_type: Set(request.process_type.as_ref().to_string()),
                    status: Set(PhaseStatus::NotStarted.as_ref().to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(model) => {
                // Re-saving never resets the lifecycle, only the descriptors
                let mut active = model.into_active_model();
                active.phase_detail_id = Set(Some(detail.id));
                active.phase_name = Set(request.phase_name);
                active.sub_task_name = Set(request.sub_task_name);
                active.step_number = Set(request.step_number);
                active.process_type = Set(request.process_type.as_ref().to_string());
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
        };

        txn.commit().await?;

        info!(sales_order_id, tracking_id = tracking.id, "production phase saved");
        self.event_sender
            .send(Event::PhaseSaved {
                sales_order_id,
                sub_task_key: tracking.sub_task_key.clone(),
            })
            .await;

        Ok(PhaseTrackingResponse::from_models(tracking, Some(detail)))
    }

    /// Lists an order's phases in production order.
    #[instrument(skip(self))]
    pub async fn list_phases(
        &self,
        sales_order_id: i32,
    ) -> Result<Vec<PhaseTrackingResponse>, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let db = &*self.db_pool;

        let rows = TrackingEntity::find()
            .filter(production_phase_tracking::Column::SalesOrderId.eq(sales_order_id))
            .order_by_asc(production_phase_tracking::Column::StepNumber)
            .find_also_related(PhaseDetailEntity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(tracking, detail)| PhaseTrackingResponse::from_models(tracking, detail))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_phase(&self, tracking_id: i32) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let db = &*self.db_pool;

        let detail = match tracking.phase_detail_id {
            Some(detail_id) => PhaseDetailEntity::find_by_id(detail_id).one(db).await?,
            None => None,
        };

        Ok(PhaseTrackingResponse::from_models(tracking, detail))
    }

    /// Marks a phase in progress, stamps its start time on the first start,
    /// and records the assignee when one is supplied.
    #[instrument(skip(self, request))]
    pub async fn start_phase(
        &self,
        tracking_id: i32,
        request: StartPhaseRequest,
    ) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let db = &*self.db_pool;
        let updated = transition_tracking(db, tracking, PhaseStatus::InProgress).await?;
        let updated = match request.assignee {
            Some(assignee) => {
                let mut active = updated.into_active_model();
                active.assignee = Set(Some(assignee));
                active.update(db).await?
            }
            None => updated,
        };

        self.event_sender.send(Event::PhaseStarted(tracking_id)).await;
        Ok(PhaseTrackingResponse::from_models(updated, None))
    }

    #[instrument(skip(self))]
    pub async fn finish_phase(
        &self,
        tracking_id: i32,
    ) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let db = &*self.db_pool;
        let updated = transition_tracking(db, tracking, PhaseStatus::Completed).await?;

        self.event_sender.send(Event::PhaseFinished(tracking_id)).await;
        Ok(PhaseTrackingResponse::from_models(updated, None))
    }

    /// Puts a phase on hold. Allowed from any state.
    #[instrument(skip(self))]
    pub async fn hold_phase(&self, tracking_id: i32) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let db = &*self.db_pool;
        let updated = transition_tracking(db, tracking, PhaseStatus::OnHold).await?;

        self.event_sender.send(Event::PhaseHeld(tracking_id)).await;
        Ok(PhaseTrackingResponse::from_models(updated, None))
    }

    /// Cancels a phase. Allowed from any state.
    #[instrument(skip(self))]
    pub async fn cancel_phase(
        &self,
        tracking_id: i32,
    ) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let db = &*self.db_pool;
        let updated = transition_tracking(db, tracking, PhaseStatus::Cancelled).await?;

        self.event_sender.send(Event::PhaseCancelled(tracking_id)).await;
        Ok(PhaseTrackingResponse::from_models(updated, None))
    }

    /// Corrects the detail record behind a tracking row.
    #[instrument(skip(self, request))]
    pub async fn edit_phase(
        &self,
        tracking_id: i32,
        request: EditPhaseRequest,
    ) -> Result<PhaseTrackingResponse, ServiceError> {
        let tracking = self.find_tracking(tracking_id).await?;
        let detail_id = tracking.phase_detail_id.ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Phase tracking {} has no detail record",
                tracking_id
            ))
        })?;

        let db = &*self.db_pool;
        let detail = PhaseDetailEntity::find_by_id(detail_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Phase detail {} not found", detail_id))
            })?;

        let now = Utc::now();
        let mut active = detail.into_active_model();
        if let Some(measurements) = request.measurements {
            active.measurements = Set(Some(measurements));
        }
        if let Some(tolerances) = request.tolerances {
            active.tolerances = Set(Some(tolerances));
        }
        if let Some(specs) = request.equipment_specifications {
            active.equipment_specifications = Set(Some(specs));
        }
        if let Some(by) = request.assembly_done_by {
            active.assembly_done_by = Set(Some(by));
        }
        if let Some(by) = request.done_by {
            active.done_by = Set(Some(by));
        }
        if let Some(by) = request.motor_done_by {
            active.motor_done_by = Set(Some(by));
        }
        if let Some(name) = request.operator_name {
            active.operator_name = Set(Some(name));
        }
        if let Some(name) = request.painter_name {
            active.painter_name = Set(Some(name));
        }
        if let Some(id) = request.welder_id {
            active.welder_id = Set(Some(id));
        }
        if let Some(name) = request.vendor_name {
            active.vendor_name = Set(Some(name));
        }
        if let Some(contact) = request.vendor_contact {
            active.vendor_contact = Set(Some(contact));
        }
        if let Some(date) = request.expected_delivery_date {
            active.expected_delivery_date = Set(Some(date));
        }
        if let Some(material_info) = request.material_info.as_ref() {
            active.material_info = Set(Some(json_field::encode("materialInfo", material_info)));
        }
        if let Some(specifications) = request.specifications {
            active.specifications = Set(Some(specifications));
        }
        if let Some(notes) = request.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(now);
        let detail = active.update(db).await?;

        Ok(PhaseTrackingResponse::from_models(tracking, Some(detail)))
    }
}
