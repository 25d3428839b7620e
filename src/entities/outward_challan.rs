use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Record of work sent out to a vendor. Append-only apart from the manual
/// `status` correction path.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "outward_challan_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sales_order_id: i32,
    pub tracking_id: i32,
    #[sea_orm(unique)]
    pub challan_number: String,
    pub vendor_name: String,
    pub vendor_contact: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub status: String,
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
        belongs_to = "super::production_phase_tracking::Entity",
        from = "Column::TrackingId",
        to = "super::production_phase_tracking::Column::Id"
    )]
    Tracking,
    #[sea_orm(has_many = "super::inward_challan::Entity")]
    InwardChallans,
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

impl Related<super::inward_challan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InwardChallans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
