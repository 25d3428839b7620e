use anyhow::Result;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::{error, info};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_sales_orders_table::Migration),
            Box::new(m20240115_000002_create_sales_order_steps_table::Migration),
            Box::new(m20240115_000003_create_step_detail_tables::Migration),
            Box::new(m20240115_000004_create_production_phase_tables::Migration),
            Box::new(m20240115_000005_create_challan_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240115_000001_create_sales_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000001_create_sales_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SalesOrders::CustomerName).string().not_null())
                        .col(ColumnDef::new(SalesOrders::CustomerEmail).string().null())
                        .col(ColumnDef::new(SalesOrders::CustomerPhone).string().null())
                        .col(ColumnDef::new(SalesOrders::PoNumber).string().null())
                        .col(ColumnDef::new(SalesOrders::Status).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::TotalAmount)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrders::Items).json().null())
                        .col(ColumnDef::new(SalesOrders::Notes).text().null())
                        .col(ColumnDef::new(SalesOrders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(SalesOrders::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_status")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesOrders {
        Table,
        Id,
        OrderNumber,
        CustomerName,
        CustomerEmail,
        CustomerPhone,
        PoNumber,
        Status,
        TotalAmount,
        Items,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000002_create_sales_order_steps_table {

    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_sales_orders_table::SalesOrders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000002_create_sales_order_steps_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderSteps::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderSteps::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderSteps::SalesOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderSteps::StepId).integer().not_null())
                        .col(ColumnDef::new(SalesOrderSteps::StepKey).string().not_null())
                        .col(ColumnDef::new(SalesOrderSteps::StepName).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrderSteps::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(SalesOrderSteps::Data).json().null())
                        .col(ColumnDef::new(SalesOrderSteps::AssignedTo).string().null())
                        .col(ColumnDef::new(SalesOrderSteps::StartedAt).timestamp().null())
                        .col(
                            ColumnDef::new(SalesOrderSteps::CompletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrderSteps::Notes).text().null())
                        .col(
                            ColumnDef::new(SalesOrderSteps::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderSteps::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_steps_order")
                                .from(SalesOrderSteps::Table, SalesOrderSteps::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_sales_order_steps_order_step")
                        .table(SalesOrderSteps::Table)
                        .col(SalesOrderSteps::SalesOrderId)
                        .col(SalesOrderSteps::StepId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_steps_status")
                        .table(SalesOrderSteps::Table)
                        .col(SalesOrderSteps::SalesOrderId)
                        .col(SalesOrderSteps::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderSteps::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesOrderSteps {
        Table,
        Id,
        SalesOrderId,
        StepId,
        StepKey,
        StepName,
        Status,
        Data,
        AssignedTo,
        StartedAt,
        CompletedAt,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000003_create_step_detail_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_sales_orders_table::SalesOrders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000003_create_step_detail_tables"
        }
    }

    fn order_fk<T>(table: T, column: T, name: &str) -> ForeignKeyCreateStatement
    where
        T: IntoIden + Copy + 'static,
    {
        ForeignKey::create()
            .name(name)
            .from(table, column)
            .to(SalesOrders::Table, SalesOrders::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ClientPoDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ClientPoDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ClientPoDetails::PoNumber).string().not_null())
                        .col(ColumnDef::new(ClientPoDetails::PoDate).date().not_null())
                        .col(ColumnDef::new(ClientPoDetails::ClientName).string().not_null())
                        .col(
                            ColumnDef::new(ClientPoDetails::ClientEmail)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::ClientPhone)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::ProjectName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::ProjectCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::ClientCompanyName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ClientPoDetails::ClientAddress).text().null())
                        .col(ColumnDef::new(ClientPoDetails::ClientGstin).string().null())
                        .col(ColumnDef::new(ClientPoDetails::BillingAddress).text().null())
                        .col(ColumnDef::new(ClientPoDetails::ShippingAddress).text().null())
                        .col(
                            ColumnDef::new(ClientPoDetails::PoValue)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::Currency)
                                .string()
                                .not_null()
                                .default("INR"),
                        )
                        .col(ColumnDef::new(ClientPoDetails::TermsConditions).json().null())
                        .col(ColumnDef::new(ClientPoDetails::Attachments).json().null())
                        .col(
                            ColumnDef::new(ClientPoDetails::ProjectRequirements)
                                .json()
                                .null(),
                        )
                        .col(ColumnDef::new(ClientPoDetails::Notes).text().null())
                        .col(
                            ColumnDef::new(ClientPoDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientPoDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            ClientPoDetails::Table,
                            ClientPoDetails::SalesOrderId,
                            "fk_client_po_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_client_po_details_po_number")
                        .table(ClientPoDetails::Table)
                        .col(ClientPoDetails::PoNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SalesOrderDetails::ClientEmail).string().null())
                        .col(ColumnDef::new(SalesOrderDetails::ClientPhone).string().null())
                        .col(
                            ColumnDef::new(SalesOrderDetails::EstimatedEndDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::BillingAddress)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::ShippingAddress)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::ProductDetails)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::QualityCompliance)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::WarrantySupport)
                                .json()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrderDetails::PaymentTerms).text().null())
                        .col(
                            ColumnDef::new(SalesOrderDetails::ProjectPriority)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::TotalAmount)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrderDetails::ProjectCode).string().null())
                        .col(ColumnDef::new(SalesOrderDetails::InternalInfo).json().null())
                        .col(
                            ColumnDef::new(SalesOrderDetails::SpecialInstructions)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            SalesOrderDetails::Table,
                            SalesOrderDetails::SalesOrderId,
                            "fk_sales_order_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DesignEngineeringDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::Documents)
                                .json()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::DesignStatus)
                                .string()
                                .not_null()
                                .default("draft"),
                        )
                        .col(ColumnDef::new(DesignEngineeringDetails::BomData).json().null())
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::Drawings3d)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::Specifications)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::DesignNotes)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::ReviewedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::ReviewedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::ApprovalComments)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DesignEngineeringDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            DesignEngineeringDetails::Table,
                            DesignEngineeringDetails::SalesOrderId,
                            "fk_design_engineering_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MaterialRequirementsDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::Materials)
                                .json()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::TotalMaterialCost)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::ProcurementStatus)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::Notes)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialRequirementsDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            MaterialRequirementsDetails::Table,
                            MaterialRequirementsDetails::SalesOrderId,
                            "fk_material_requirements_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductionPlanDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionPlanDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ProductionPlanDetails::Timeline).json().null())
                        .col(
                            ColumnDef::new(ProductionPlanDetails::SelectedPhases)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::PhaseDetails)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::ProductionNotes)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::EstimatedCompletionDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPlanDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            ProductionPlanDetails::Table,
                            ProductionPlanDetails::SalesOrderId,
                            "fk_production_plan_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityCheckDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityCheckDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::QualityStandards)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::WeldingStandards)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::SurfaceFinish)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::MechanicalLoadTesting)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::ElectricalCompliance)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::DocumentsRequired)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::WarrantyPeriod)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::ServiceSupport)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::InternalProjectOwner)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::QcStatus)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(QualityCheckDetails::InspectedBy).string().null())
                        .col(
                            ColumnDef::new(QualityCheckDetails::InspectionDate)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(QualityCheckDetails::QcReport).text().null())
                        .col(ColumnDef::new(QualityCheckDetails::Remarks).text().null())
                        .col(
                            ColumnDef::new(QualityCheckDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            QualityCheckDetails::Table,
                            QualityCheckDetails::SalesOrderId,
                            "fk_quality_check_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ShipmentDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ShipmentDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::DeliverySchedule)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ShipmentDetails::PackagingInfo).string().null())
                        .col(ColumnDef::new(ShipmentDetails::DispatchMode).string().null())
                        .col(
                            ColumnDef::new(ShipmentDetails::InstallationRequired)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::SiteCommissioning)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ShipmentDetails::Marking).string().null())
                        .col(ColumnDef::new(ShipmentDetails::Dismantling).string().null())
                        .col(ColumnDef::new(ShipmentDetails::Packing).string().null())
                        .col(ColumnDef::new(ShipmentDetails::Dispatch).string().null())
                        .col(ColumnDef::new(ShipmentDetails::ShipmentMethod).string().null())
                        .col(ColumnDef::new(ShipmentDetails::CarrierName).string().null())
                        .col(
                            ColumnDef::new(ShipmentDetails::TrackingNumber)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::EstimatedDeliveryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::ShippingAddress)
                                .text()
                                .null(),
                        )
                        .col(ColumnDef::new(ShipmentDetails::ShipmentDate).timestamp().null())
                        .col(
                            ColumnDef::new(ShipmentDetails::ShipmentStatus)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::ShipmentCost)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(ShipmentDetails::Notes).text().null())
                        .col(
                            ColumnDef::new(ShipmentDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            ShipmentDetails::Table,
                            ShipmentDetails::SalesOrderId,
                            "fk_shipment_details_order",
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DeliveryDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::SalesOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::ActualDeliveryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::CustomerContact)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::InstallationCompleted)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::SiteCommissioningCompleted)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::WarrantyTermsAcceptance)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::CompletionRemarks)
                                .text()
                                .null(),
                        )
                        .col(ColumnDef::new(DeliveryDetails::ProjectManager).string().null())
                        .col(
                            ColumnDef::new(DeliveryDetails::ProductionSupervisor)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(DeliveryDetails::DeliveryDate).date().null())
                        .col(ColumnDef::new(DeliveryDetails::ReceivedBy).string().null())
                        .col(
                            ColumnDef::new(DeliveryDetails::DeliveryStatus)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::DeliveredQuantity)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::RecipientSignaturePath)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(DeliveryDetails::DeliveryNotes).text().null())
                        .col(ColumnDef::new(DeliveryDetails::PodNumber).string().null())
                        .col(
                            ColumnDef::new(DeliveryDetails::DeliveryCost)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(&mut order_fk(
                            DeliveryDetails::Table,
                            DeliveryDetails::SalesOrderId,
                            "fk_delivery_details_order",
                        ))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DeliveryDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ShipmentDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(QualityCheckDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductionPlanDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(MaterialRequirementsDetails::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(DesignEngineeringDetails::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrderDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ClientPoDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum ClientPoDetails {
        Table,
        Id,
        SalesOrderId,
        PoNumber,
        PoDate,
        ClientName,
        ClientEmail,
        ClientPhone,
        ProjectName,
        ProjectCode,
        ClientCompanyName,
        ClientAddress,
        ClientGstin,
        BillingAddress,
        ShippingAddress,
        PoValue,
        Currency,
        TermsConditions,
        Attachments,
        ProjectRequirements,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum SalesOrderDetails {
        Table,
        Id,
        SalesOrderId,
        ClientEmail,
        ClientPhone,
        EstimatedEndDate,
        BillingAddress,
        ShippingAddress,
        ProductDetails,
        QualityCompliance,
        WarrantySupport,
        PaymentTerms,
        ProjectPriority,
        TotalAmount,
        ProjectCode,
        InternalInfo,
        SpecialInstructions,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum DesignEngineeringDetails {
        Table,
        Id,
        SalesOrderId,
        Documents,
        DesignStatus,
        BomData,
        #[sea_orm(iden = "drawings_3d")]
        Drawings3d,
        Specifications,
        DesignNotes,
        ReviewedBy,
        ReviewedAt,
        ApprovalComments,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum MaterialRequirementsDetails {
        Table,
        Id,
        SalesOrderId,
        Materials,
        TotalMaterialCost,
        ProcurementStatus,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum ProductionPlanDetails {
        Table,
        Id,
        SalesOrderId,
        Timeline,
        SelectedPhases,
        PhaseDetails,
        ProductionNotes,
        EstimatedCompletionDate,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum QualityCheckDetails {
        Table,
        Id,
        SalesOrderId,
        QualityStandards,
        WeldingStandards,
        SurfaceFinish,
        MechanicalLoadTesting,
        ElectricalCompliance,
        DocumentsRequired,
        WarrantyPeriod,
        ServiceSupport,
        InternalProjectOwner,
        QcStatus,
        InspectedBy,
        InspectionDate,
        QcReport,
        Remarks,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum ShipmentDetails {
        Table,
        Id,
        SalesOrderId,
        DeliverySchedule,
        PackagingInfo,
        DispatchMode,
        InstallationRequired,
        SiteCommissioning,
        Marking,
        Dismantling,
        Packing,
        Dispatch,
        ShipmentMethod,
        CarrierName,
        TrackingNumber,
        EstimatedDeliveryDate,
        ShippingAddress,
        ShipmentDate,
        ShipmentStatus,
        ShipmentCost,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum DeliveryDetails {
        Table,
        Id,
        SalesOrderId,
        ActualDeliveryDate,
        CustomerContact,
        InstallationCompleted,
        SiteCommissioningCompleted,
        WarrantyTermsAcceptance,
        CompletionRemarks,
        ProjectManager,
        ProductionSupervisor,
        DeliveryDate,
        ReceivedBy,
        DeliveryStatus,
        DeliveredQuantity,
        RecipientSignaturePath,
        DeliveryNotes,
        PodNumber,
        DeliveryCost,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000004_create_production_phase_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_sales_orders_table::SalesOrders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000004_create_production_phase_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductionPhaseDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::SalesOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::SubTaskKey)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::PhaseName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::SubTaskName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::ProcessType)
                                .string()
                                .not_null()
                                .default("inhouse"),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::Measurements)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::Tolerances)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::EquipmentSpecifications)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::AssemblyDoneBy)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ProductionPhaseDetails::DoneBy).string().null())
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::MotorDoneBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::OperatorName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::PainterName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::WelderId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::VendorName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::VendorContact)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::ExpectedDeliveryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::MaterialInfo)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::Specifications)
                                .text()
                                .null(),
                        )
                        .col(ColumnDef::new(ProductionPhaseDetails::Notes).text().null())
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_phase_details_order")
                                .from(
                                    ProductionPhaseDetails::Table,
                                    ProductionPhaseDetails::SalesOrderId,
                                )
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_production_phase_details_order_subtask")
                        .table(ProductionPhaseDetails::Table)
                        .col(ProductionPhaseDetails::SalesOrderId)
                        .col(ProductionPhaseDetails::SubTaskKey)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductionPhaseTracking::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::SalesOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::PhaseDetailId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::SubTaskKey)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::PhaseName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::SubTaskName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::StepNumber)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::ProcessType)
                                .string()
                                .not_null()
                                .default("inhouse"),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::Status)
                                .string()
                                .not_null()
                                .default("Not Started"),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::StartTime)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::FinishTime)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::Assignee)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::OutwardChallanNo)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::InwardChallanNo)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionPhaseTracking::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_phase_tracking_order")
                                .from(
                                    ProductionPhaseTracking::Table,
                                    ProductionPhaseTracking::SalesOrderId,
                                )
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_phase_tracking_detail")
                                .from(
                                    ProductionPhaseTracking::Table,
                                    ProductionPhaseTracking::PhaseDetailId,
                                )
                                .to(ProductionPhaseDetails::Table, ProductionPhaseDetails::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_phase_tracking_order")
                        .table(ProductionPhaseTracking::Table)
                        .col(ProductionPhaseTracking::SalesOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductionPhaseTracking::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductionPhaseDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductionPhaseDetails {
        Table,
        Id,
        SalesOrderId,
        SubTaskKey,
        PhaseName,
        SubTaskName,
        ProcessType,
        Measurements,
        Tolerances,
        EquipmentSpecifications,
        AssemblyDoneBy,
        DoneBy,
        MotorDoneBy,
        OperatorName,
        PainterName,
        WelderId,
        VendorName,
        VendorContact,
        ExpectedDeliveryDate,
        MaterialInfo,
        Specifications,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductionPhaseTracking {
        Table,
        Id,
        SalesOrderId,
        PhaseDetailId,
        SubTaskKey,
        PhaseName,
        SubTaskName,
        StepNumber,
        ProcessType,
        Status,
        StartTime,
        FinishTime,
        Assignee,
        OutwardChallanNo,
        InwardChallanNo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000005_create_challan_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_sales_orders_table::SalesOrders;
    use super::m20240115_000004_create_production_phase_tables::ProductionPhaseTracking;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000005_create_challan_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OutwardChallanDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutwardChallanDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::SalesOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::TrackingId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::ChallanNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::VendorName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::VendorContact)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::ExpectedDeliveryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::Status)
                                .string()
                                .not_null()
                                .default("Issued"),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutwardChallanDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_outward_challan_details_order")
                                .from(
                                    OutwardChallanDetails::Table,
                                    OutwardChallanDetails::SalesOrderId,
                                )
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_outward_challan_details_tracking")
                                .from(
                                    OutwardChallanDetails::Table,
                                    OutwardChallanDetails::TrackingId,
                                )
                                .to(ProductionPhaseTracking::Table, ProductionPhaseTracking::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_outward_challan_details_order")
                        .table(OutwardChallanDetails::Table)
                        .col(OutwardChallanDetails::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InwardChallanDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InwardChallanDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::OutwardChallanId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::TrackingId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::ChallanNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::Status)
                                .string()
                                .not_null()
                                .default("Received"),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::QualityStatus)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InwardChallanDetails::Notes).text().null())
                        .col(
                            ColumnDef::new(InwardChallanDetails::ReceivedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InwardChallanDetails::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inward_challan_details_outward")
                                .from(
                                    InwardChallanDetails::Table,
                                    InwardChallanDetails::OutwardChallanId,
                                )
                                .to(OutwardChallanDetails::Table, OutwardChallanDetails::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inward_challan_details_tracking")
                                .from(
                                    InwardChallanDetails::Table,
                                    InwardChallanDetails::TrackingId,
                                )
                                .to(ProductionPhaseTracking::Table, ProductionPhaseTracking::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inward_challan_details_outward")
                        .table(InwardChallanDetails::Table)
                        .col(InwardChallanDetails::OutwardChallanId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InwardChallanDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OutwardChallanDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OutwardChallanDetails {
        Table,
        Id,
        SalesOrderId,
        TrackingId,
        ChallanNumber,
        VendorName,
        VendorContact,
        ExpectedDeliveryDate,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InwardChallanDetails {
        Table,
        Id,
        OutwardChallanId,
        TrackingId,
        ChallanNumber,
        Status,
        QualityStatus,
        Notes,
        ReceivedAt,
        CreatedAt,
        UpdatedAt,
    }
}

// Database migration CLI runner
pub async fn run_migration(db_url: &str) -> Result<()> {
    info!("Setting up database connection for migrations");

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    info!("Running database migrations");

    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            Err(e.into())
        }
    }
}
