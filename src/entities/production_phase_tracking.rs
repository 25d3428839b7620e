use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle row for a production phase, created alongside the first save of
/// its detail. Challan numbers are stamped here when the phase is outsourced
/// and when the work comes back.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "production_phase_tracking")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_order::Entity",
        from = "Column::SalesOrderId",
        to = "super::sales_order::Column::Id"
    )]
    SalesOrder,
    #[sea_orm(
        belongs_to = "super::production_phase_detail::Entity",
        from = "Column::PhaseDetailId",
        to = "super::production_phase_detail::Column::Id"
    )]
    PhaseDetail,
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl Related<super::production_phase_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhaseDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
