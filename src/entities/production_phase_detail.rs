use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One production sub-task for an order, unique per (sales_order_id,
/// sub_task_key). Process-specific columns (operator, welder, vendor, …) are
/// all optional; which of them matter depends on the sub-task.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "production_phase_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sales_order_id: i32,
    pub sub_task_key: String,
    pub phase_name: String,
    pub sub_task_name: String,
    pub process_type: String,
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
    pub material_info: Option<Json>,
    pub specifications: Option<String>,
    pub notes: Option<String>,
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
    #[sea_orm(has_one = "super::production_phase_tracking::Entity")]
    Tracking,
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl Related<super::production_phase_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
