use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Record of outsourced work received back, linked to the outward challan it
/// closes. `quality_status` is the only field corrected after the fact.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "inward_challan_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub outward_challan_id: i32,
    pub tracking_id: Option<i32>,
    #[sea_orm(unique)]
    pub challan_number: String,
    pub status: String,
    pub quality_status: Option<String>,
    pub notes: Option<String>,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outward_challan::Entity",
        from = "Column::OutwardChallanId",
        to = "super::outward_challan::Column::Id"
    )]
    OutwardChallan,
    #[sea_orm(
        belongs_to = "super::production_phase_tracking::Entity",
        from = "Column::TrackingId",
        to = "super::production_phase_tracking::Column::Id"
    )]
    Tracking,
}

impl Related<super::outward_challan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutwardChallan.def()
    }
}

impl Related<super::production_phase_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
