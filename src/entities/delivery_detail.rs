use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "delivery_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sales_order_id: i32,
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
    pub delivery_status: String,
    pub delivered_quantity: Option<i32>,
    pub recipient_signature_path: Option<String>,
    pub delivery_notes: Option<String>,
    pub pod_number: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub delivery_cost: Option<Decimal>,
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
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
