use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "shipment_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sales_order_id: i32,
    pub delivery_schedule: Option<String>,
    pub packaging_info: Option<String>,
    pub dispatch_mode: Option<String>,
    pub installation_required: Option<String>,
    pub site_commissioning: Option<String>,
    pub marking: Option<String>,
    pub dismantling: Option<String>,
    pub packing: Option<String>,
    pub dispatch: Option<String>,
    pub shipment_method: Option<String>,
    pub carrier_name: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub shipping_address: Option<String>,
    pub shipment_date: Option<DateTime<Utc>>,
    pub shipment_status: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub shipment_cost: Option<Decimal>,
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
