use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client PO detail, one row per sales order. Required columns fall back to
/// "TBD" placeholders when the row is seeded from a partial slice update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "client_po_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sales_order_id: i32,
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
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub po_value: Option<Decimal>,
    pub currency: String,
    pub terms_conditions: Option<Json>,
    pub attachments: Option<Json>,
    pub project_requirements: Option<Json>,
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
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
