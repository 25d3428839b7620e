use crate::{
    db::DbPool,
    entities::sales_order::Entity as OrderEntity,
    entities::sales_order_step::{
        self, ActiveModel as StepActiveModel, Entity as StepEntity, Model as StepModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    pipeline::steps::{parse_step_key, StepInfo, StepStatus, TOTAL_STEPS},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStepStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignStepRequest {
    #[validate(length(min = 1, message = "Assignee is required"))]
    pub assigned_to: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddStepNoteRequest {
    #[validate(length(min = 1, message = "Note must not be empty"))]
    pub note: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepTrackerResponse {
    pub id: i32,
    pub sales_order_id: i32,
    pub step_id: i32,
    pub step_key: String,
    pub step_name: String,
    pub status: String,
    pub data: Option<Value>,
    pub assigned_to: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<StepModel> for StepTrackerResponse {
    fn from(model: StepModel) -> Self {
        Self {
            id: model.id,
            sales_order_id: model.sales_order_id,
            step_id: model.step_id,
            step_key: model.step_key,
            step_name: model.step_name,
            status: model.status,
            data: model.data,
            assigned_to: model.assigned_to,
            started_at: model.started_at,
            completed_at: model.completed_at,
            notes: model.notes,
            updated_at: model.updated_at,
        }
    }
}

/// Pipeline completion summary. The denominator is always the fixed step
/// count; `tracked_steps` reports how many tracker rows actually exist so
/// callers can tell a fresh order from a fully seeded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_steps: u32,
    pub tracked_steps: u32,
    pub completed_steps: u32,
    pub in_progress_steps: u32,
    pub remaining_steps: u32,
    pub percentage: u32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepListResponse {
    pub steps: Vec<StepTrackerResponse>,
    pub progress: ProgressSummary,
}

/// Computes pipeline progress from tracker statuses.
pub fn compute_progress(statuses: &[StepStatus]) -> ProgressSummary {
    let total = TOTAL_STEPS as u32;
    let completed = statuses
        .iter()
        .filter(|s| **s == StepStatus::Completed)
        .count() as u32;
    let in_progress = statuses
        .iter()
        .filter(|s| **s == StepStatus::InProgress)
        .count() as u32;

    ProgressSummary {
        total_steps: total,
        tracked_steps: statuses.len() as u32,
        completed_steps: completed,
        in_progress_steps: in_progress,
        remaining_steps: total.saturating_sub(completed),
        percentage: (completed * 100 + total / 2) / total,
    }
}

/// Records a detail submission against the step tracker, inside the caller's
/// transaction. Creates the tracker row on first write; every submission
/// puts the status at in_progress, so editing a completed step reopens it.
/// `started_at` is stamped once and `completed_at` is left untouched.
/// `snapshot` must be the freshly persisted detail row, never the raw
/// request body.
pub async fn record_submission<C: ConnectionTrait>(
    conn: &C,
    sales_order_id: i32,
    step: &'static StepInfo,
    snapshot: Value,
) -> Result<StepModel, ServiceError> {
    let now = Utc::now();

    let existing = StepEntity::find()
        .filter(sales_order_step::Column::SalesOrderId.eq(sales_order_id))
        .filter(sales_order_step::Column::StepId.eq(step.id))
        .one(conn)
        .await?;

    let model = match existing {
        None => {
            let active = StepActiveModel {
                sales_order_id: Set(sales_order_id),
                step_id: Set(step.id),
                step_key: Set(step.key.as_ref().to_string()),
                step_name: Set(step.name.to_string()),
                status: Set(StepStatus::InProgress.as_ref().to_string()),
                data: Set(Some(snapshot)),
                started_at: Set(Some(now)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            active.insert(conn).await?
        }
        Some(model) => {
            let started_at = model.started_at;
            let mut active = model.into_active_model();
            active.data = Set(Some(snapshot));
            active.status = Set(StepStatus::InProgress.as_ref().to_string());
            active.started_at = Set(started_at.or(Some(now)));
            active.updated_at = Set(now);
            active.update(conn).await?
        }
    };

    Ok(model)
}

/// Puts a tracker back to its untouched state after its detail record is
/// deleted. Runs inside the caller's transaction; a missing tracker is fine.
pub async fn reset_tracker<C: ConnectionTrait>(
    conn: &C,
    sales_order_id: i32,
    step: &'static StepInfo,
) -> Result<(), ServiceError> {
    let existing = StepEntity::find()
        .filter(sales_order_step::Column::SalesOrderId.eq(sales_order_id))
        .filter(sales_order_step::Column::StepId.eq(step.id))
        .one(conn)
        .await?;

    if let Some(model) = existing {
        let mut active = model.into_active_model();
        active.status = Set(StepStatus::Pending.as_ref().to_string());
        active.data = Set(None);
        active.assigned_to = Set(None);
        active.notes = Set(None);
        active.started_at = Set(None);
        active.completed_at = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(conn).await?;
    }

    Ok(())
}

/// Service for step tracker reads and lifecycle updates.
#[derive(Clone)]
pub struct StepTrackerService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StepTrackerService {
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

    async fn find_tracker(
        &self,
        sales_order_id: i32,
        step_key: &str,
    ) -> Result<(StepModel, &'static StepInfo), ServiceError> {
        let step = parse_step_key(step_key)
            .ok_or_else(|| ServiceError::BadRequest(format!("Unknown step key: {}", step_key)))?;

        let db = &*self.db_pool;
        let model = StepEntity::find()
            .filter(sales_order_step::Column::SalesOrderId.eq(sales_order_id))
            .filter(sales_order_step::Column::StepId.eq(step.id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Step {} not started for sales order {}",
                    step_key, sales_order_id
                ))
            })?;

        Ok((model, step))
    }

    #[instrument(skip(self))]
    pub async fn list_for_order(
        &self,
        sales_order_id: i32,
    ) -> Result<StepListResponse, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;

        let db = &*self.db_pool;
        let trackers = StepEntity::find()
            .filter(sales_order_step::Column::SalesOrderId.eq(sales_order_id))
            .order_by_asc(sales_order_step::Column::StepId)
            .all(db)
            .await?;

        let statuses: Vec<StepStatus> = trackers
            .iter()
            .filter_map(|t| t.status.parse().ok())
            .collect();
        let progress = compute_progress(&statuses);

        Ok(StepListResponse {
            steps: trackers.into_iter().map(Into::into).collect(),
            progress,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_by_key(
        &self,
        sales_order_id: i32,
        step_key: &str,
    ) -> Result<StepTrackerResponse, ServiceError> {
        self.ensure_order_exists(sales_order_id).await?;
        let (model, _) = self.find_tracker(sales_order_id, step_key).await?;
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn progress(&self, sales_order_id: i32) -> Result<ProgressSummary, ServiceError> {
        Ok(self.list_for_order(sales_order_id).await?.progress)
    }

    /// Moves a tracker to a new status with timestamp stamping rules:
    /// `started_at` is set when a pending step goes in_progress, and
    /// `completed_at` is set exactly once, the first time the step completes.
    #[instrument(skip(self, request), fields(new_status = %request.status))]
    pub async fn update_status(
        &self,
        sales_order_id: i32,
        step_key: &str,
        request: UpdateStepStatusRequest,
    ) -> Result<StepTrackerResponse, ServiceError> {
        request.validate()?;
        let new_status: StepStatus = request.status.parse().map_err(|_| {
            ServiceError::InvalidStatus(format!("Unknown step status: {}", request.status))
        })?;

        self.ensure_order_exists(sales_order_id).await?;
        let (model, step) = self.find_tracker(sales_order_id, step_key).await?;

        let now = Utc::now();
        let old_status = model.status.clone();
        let started_at = model.started_at;
        let completed_at = model.completed_at;
        let notes = model.notes.clone();

        let mut active = model.into_active_model();
        active.status = Set(new_status.as_ref().to_string());
        if old_status == StepStatus::Pending.as_ref() && new_status == StepStatus::InProgress {
            active.started_at = Set(started_at.or(Some(now)));
        }
        if new_status == StepStatus::Completed {
            // COALESCE: first completion wins, later re-completions keep it
            active.completed_at = Set(completed_at.or(Some(now)));
        }
        if let Some(note) = request.notes {
            active.notes = Set(Some(note));
        } else {
            active.notes = Set(notes);
        }
        active.updated_at = Set(now);

        let db = &*self.db_pool;
        let updated = active.update(db).await?;

        info!(
            sales_order_id,
            step_key,
            old_status,
            new_status = updated.status,
            "step status updated"
        );
        self.event_sender
            .send(Event::StepStatusChanged {
                sales_order_id,
                step_key: step.key.as_ref().to_string(),
                old_status,
                new_status: updated.status.clone(),
            })
            .await;

        Ok(updated.into())
    }

    #[instrument(skip(self, request))]
    pub async fn assign(
        &self,
        sales_order_id: i32,
        step_key: &str,
        request: AssignStepRequest,
    ) -> Result<StepTrackerResponse, ServiceError> {
        request.validate()?;

        self.ensure_order_exists(sales_order_id).await?;
        let (model, step) = self.find_tracker(sales_order_id, step_key).await?;

        let mut active = model.into_active_model();
        active.assigned_to = Set(Some(request.assigned_to.clone()));
        active.updated_at = Set(Utc::now());

        let db = &*self.db_pool;
        let updated = active.update(db).await?;

        self.event_sender
            .send(Event::StepAssigned {
                sales_order_id,
                step_key: step.key.as_ref().to_string(),
                assignee: request.assigned_to,
            })
            .await;

        Ok(updated.into())
    }

    /// Appends a note to the tracker. Empty notes are rejected.
    #[instrument(skip(self, request))]
    pub async fn add_note(
        &self,
        sales_order_id: i32,
        step_key: &str,
        request: AddStepNoteRequest,
    ) -> Result<StepTrackerResponse, ServiceError> {
        if request.note.trim().is_empty() {
            return Err(ServiceError::BadRequest("Note must not be empty".into()));
        }

        self.ensure_order_exists(sales_order_id).await?;
        let (model, _) = self.find_tracker(sales_order_id, step_key).await?;

        let combined = match &model.notes {
            Some(existing) if !existing.is_empty() => {
                format!("{}\n{}", existing, request.note)
            }
            _ => request.note.clone(),
        };

        let mut active = model.into_active_model();
        active.notes = Set(Some(combined));
        active.updated_at = Set(Utc::now());

        let db = &*self.db_pool;
        let updated = active.update(db).await?;
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn progress_of_no_trackers_is_zero() {
        let progress = compute_progress(&[]);
        assert_eq!(progress.total_steps, 8);
        assert_eq!(progress.tracked_steps, 0);
        assert_eq!(progress.completed_steps, 0);
        assert_eq!(progress.percentage, 0);
        assert_eq!(progress.remaining_steps, 8);
    }

    #[test]
    fn progress_counts_completed_against_fixed_total() {
        let statuses = vec![
            StepStatus::Completed,
            StepStatus::Completed,
            StepStatus::InProgress,
        ];
        let progress = compute_progress(&statuses);
        assert_eq!(progress.total_steps, 8);
        assert_eq!(progress.tracked_steps, 3);
        assert_eq!(progress.completed_steps, 2);
        assert_eq!(progress.in_progress_steps, 1);
        assert_eq!(progress.remaining_steps, 6);
        assert_eq!(progress.percentage, 25);
    }

    #[test]
    fn full_pipeline_is_one_hundred_percent() {
        let statuses = vec![StepStatus::Completed; 8];
        let progress = compute_progress(&statuses);
        assert_eq!(progress.percentage, 100);
        assert_eq!(progress.remaining_steps, 0);
    }

    fn arb_status() -> impl Strategy<Value = StepStatus> {
        prop_oneof![
            Just(StepStatus::Pending),
            Just(StepStatus::InProgress),
            Just(StepStatus::Completed),
            Just(StepStatus::OnHold),
            Just(StepStatus::Approved),
            Just(StepStatus::Rejected),
        ]
    }

    proptest! {
        #[test]
        fn percentage_is_always_in_bounds(statuses in prop::collection::vec(arb_status(), 0..=8)) {
            let progress = compute_progress(&statuses);
            prop_assert!(progress.percentage <= 100);
            prop_assert!(progress.completed_steps <= progress.total_steps);
            prop_assert_eq!(
                progress.remaining_steps,
                progress.total_steps - progress.completed_steps
            );
        }
    }
}
