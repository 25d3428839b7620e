use crate::{
    db::DbPool,
    entities::{
        inward_challan::{
            self, ActiveModel as InwardActiveModel, Entity as InwardEntity, Model as InwardModel,
        },
        outward_challan::{
            self, ActiveModel as OutwardActiveModel, Entity as OutwardEntity,
            Model as OutwardModel,
        },
        production_phase_tracking::Entity as TrackingEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    pipeline::phases::PhaseStatus,
    services::production_phases::transition_tracking,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

pub const OUTWARD_PREFIX: &str = "OC";
pub const INWARD_PREFIX: &str = "IC";

/// Challan numbers are minted from the issue instant, e.g. `OC-1714041600123`.
pub fn mint_challan_number(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutwardChallanRequest {
    pub tracking_id: i32,
    #[validate(length(min = 1, message = "Vendor name is required"))]
    pub vendor_name: String,
    pub vendor_contact: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInwardChallanRequest {
    pub outward_challan_id: i32,
    pub quality_status: Option<String>,
    pub notes: Option<String>,
}

/// Manual correction of an outward challan's status.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutwardChallanRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Manual correction of an inward challan after the goods were inspected.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInwardChallanRequest {
    pub status: Option<String>,
    pub quality_status: Option<String>,
    pub notes: Option<String>,
}

/// Service for the outward/inward challan protocol around outsourced phases.
#[derive(Clone)]
pub struct ChallanService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ChallanService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Issues an outward challan for an outsourced phase. The tracking row
    /// moves to Outsourced and records the challan number, atomically with
    /// the challan insert.
    #[instrument(skip(self, request), fields(tracking_id = request.tracking_id))]
    pub async fn create_outward(
        &self,
        request: CreateOutwardChallanRequest,
    ) -> Result<OutwardModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let tracking = TrackingEntity::find_by_id(request.tracking_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Phase tracking {} not found",
                    request.tracking_id
                ))
            })?;

        let now = Utc::now();
        let challan_number = mint_challan_number(OUTWARD_PREFIX);

        let challan = OutwardActiveModel {
            sales_order_id: Set(tracking.sales_order_id),
            tracking_id: Set(tracking.id),
            challan_number: Set(challan_number.clone()),
            vendor_name: Set(request.vendor_name),
            vendor_contact: Set(request.vendor_contact),
            expected_delivery_date: Set(request.expected_delivery_date),
            status: Set("Issued".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let tracking_id = tracking.id;
        let updated = transition_tracking(&txn, tracking, PhaseStatus::Outsourced).await?;
        let mut active = updated.into_active_model();
        active.outward_challan_no = Set(Some(challan_number.clone()));
        active.update(&txn).await?;

        txn.commit().await?;

        info!(tracking_id, challan_number = %challan.challan_number, "outward challan issued");
        self.event_sender
            .send(Event::OutwardChallanIssued {
                tracking_id,
                challan_number,
            })
            .await;

        Ok(challan)
    }

    /// Receives outsourced work back. Closes the loop: the inward challan is
    /// recorded against the outward one and the phase completes.
    #[instrument(skip(self, request), fields(outward_challan_id = request.outward_challan_id))]
    pub async fn create_inward(
        &self,
        request: CreateInwardChallanRequest,
    ) -> Result<InwardModel, ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await?;

        let outward = OutwardEntity::find_by_id(request.outward_challan_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Outward challan {} not found",
                    request.outward_challan_id
                ))
            })?;

        let now = Utc::now();
        let challan_number = mint_challan_number(INWARD_PREFIX);

        let challan = InwardActiveModel {
            outward_challan_id: Set(outward.id),
            tracking_id: Set(Some(outward.tracking_id)),
            challan_number: Set(challan_number.clone()),
            status: Set("Received".to_string()),
            quality_status: Set(request.quality_status),
            notes: Set(request.notes),
            received_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(tracking) = TrackingEntity::find_by_id(outward.tracking_id)
            .one(&txn)
            .await?
        {
            let updated = transition_tracking(&txn, tracking, PhaseStatus::Completed).await?;
            let mut active = updated.into_active_model();
            active.inward_challan_no = Set(Some(challan_number.clone()));
            active.update(&txn).await?;
        }

        txn.commit().await?;

        info!(
            outward_challan_id = outward.id,
            challan_number = %challan.challan_number,
            "inward challan received"
        );
        self.event_sender
            .send(Event::InwardChallanReceived {
                outward_challan_id: outward.id,
                challan_number,
            })
            .await;

        Ok(challan)
    }

    /// Lists an order's outward challans, newest first.
    #[instrument(skip(self))]
    pub async fn list_outward(
        &self,
        sales_order_id: i32,
    ) -> Result<Vec<OutwardModel>, ServiceError> {
        let db = &*self.db_pool;
        Ok(OutwardEntity::find()
            .filter(outward_challan::Column::SalesOrderId.eq(sales_order_id))
            .order_by_desc(outward_challan::Column::CreatedAt)
            .all(db)
            .await?)
    }

    /// Lists the inward challans recorded against an outward challan.
    #[instrument(skip(self))]
    pub async fn list_inward(
        &self,
        outward_challan_id: i32,
    ) -> Result<Vec<InwardModel>, ServiceError> {
        let db = &*self.db_pool;
        OutwardEntity::find_by_id(outward_challan_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Outward challan {} not found",
                    outward_challan_id
                ))
            })?;

        Ok(InwardEntity::find()
            .filter(inward_challan::Column::OutwardChallanId.eq(outward_challan_id))
            .order_by_desc(inward_challan::Column::CreatedAt)
            .all(db)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn update_outward(
        &self,
        challan_id: i32,
        request: UpdateOutwardChallanRequest,
    ) -> Result<OutwardModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let challan = OutwardEntity::find_by_id(challan_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Outward challan {} not found", challan_id))
            })?;

        let mut active = challan.into_active_model();
        active.status = Set(request.status);
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    #[instrument(skip(self, request))]
    pub async fn update_inward(
        &self,
        challan_id: i32,
        request: UpdateInwardChallanRequest,
    ) -> Result<InwardModel, ServiceError> {
        let db = &*self.db_pool;
        let challan = InwardEntity::find_by_id(challan_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Inward challan {} not found", challan_id))
            })?;

        let mut active = challan.into_active_model();
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(quality_status) = request.quality_status {
            active.quality_status = Set(Some(quality_status));
        }
        if let Some(notes) = request.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challan_numbers_carry_prefix_and_millis() {
        let number = mint_challan_number(OUTWARD_PREFIX);
        let (prefix, rest) = number.split_once('-').unwrap();
        assert_eq!(prefix, "OC");
        let millis: i64 = rest.parse().unwrap();
        assert!(millis > 1_600_000_000_000);
    }
}
