use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "quality_check_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub sales_order_id: i32,
    pub quality_standards: Option<String>,
    pub welding_standards: Option<String>,
    pub surface_finish: Option<String>,
    pub mechanical_load_testing: Option<String>,
    pub electrical_compliance: Option<String>,
    pub documents_required: Option<String>,
    pub warranty_period: Option<String>,
    pub service_support: Option<String>,
    pub internal_project_owner: Option<String>,
    pub qc_status: String,
    pub inspected_by: Option<String>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub qc_report: Option<String>,
    pub remarks: Option<String>,
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
