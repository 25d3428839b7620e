use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Root aggregate. Every detail record, step tracker, phase row and challan
/// hangs off one of these via `sales_order_id` with cascade delete.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub po_number: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total_amount: Option<Decimal>,
    /// JSON list of line items, see `models::OrderItem`.
    pub items: Option<Json>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_order_step::Entity")]
    Steps,
    #[sea_orm(has_many = "super::production_phase_tracking::Entity")]
    PhaseTracking,
    #[sea_orm(has_many = "super::outward_challan::Entity")]
    OutwardChallans,
}

impl Related<super::sales_order_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Steps.def()
    }
}

impl Related<super::production_phase_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhaseTracking.def()
    }
}

impl Related<super::outward_challan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutwardChallans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
