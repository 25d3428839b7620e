use crate::{
    db::DbPool,
    entities::sales_order::{
        self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{json_field, OrderItem},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order number is required"))]
    pub order_number: String,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub po_number: Option<String>,
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub po_number: Option<String>,
    pub status: String,
    pub total_amount: Option<Decimal>,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Summary counters for the order book.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsResponse {
    pub total_orders: u64,
    pub by_status: BTreeMap<String, u64>,
    pub total_value: Decimal,
}

/// Service for managing the root sales order aggregate.
#[derive(Clone)]
pub struct SalesOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SalesOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(order_number = %request.order_number))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let active = OrderActiveModel {
            order_number: Set(request.order_number.clone()),
            customer_name: Set(request.customer_name),
            customer_email: Set(request.customer_email),
            customer_phone: Set(request.customer_phone),
            po_number: Set(request.po_number),
            status: Set("active".to_string()),
            total_amount: Set(request.total_amount),
            items: Set(Some(json_field::encode("items", &request.items))),
            notes: Set(request.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create sales order");
            ServiceError::DatabaseError(e)
        })?;

        info!(order_id = model.id, "Sales order created");
        self.event_sender.send(Event::OrderCreated(model.id)).await;

        Ok(model_to_response(model))
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: i32) -> Result<OrderResponse, ServiceError> {
        let model = self.find_order(order_id).await?;
        Ok(model_to_response(model))
    }

    /// Fetches the raw order row, returning NotFound when absent. Used by the
    /// other services to validate order identifiers.
    pub async fn find_order(&self, order_id: i32) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;
        OrderEntity::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", order_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<OrderListResponse, ServiceError> {
        let db = &*self.db_pool;

        let paginator = OrderEntity::find()
            .order_by_desc(sales_order::Column::CreatedAt)
            .paginate(db, per_page);

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(OrderListResponse {
            orders: orders.into_iter().map(model_to_response).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Deletes an order. All detail records, trackers, phase rows and
    /// challans cascade away with it.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let model = self.find_order(order_id).await?;

        model.delete(db).await?;

        info!(order_id, "Sales order deleted");
        self.event_sender.send(Event::OrderDeleted(order_id)).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn order_stats(&self) -> Result<OrderStatsResponse, ServiceError> {
        let db = &*self.db_pool;
        let orders = OrderEntity::find().all(db).await?;

        let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
        let mut total_value = Decimal::ZERO;
        for order in &orders {
            *by_status.entry(order.status.clone()).or_default() += 1;
            if let Some(amount) = order.total_amount {
                total_value += amount;
            }
        }

        Ok(OrderStatsResponse {
            total_orders: orders.len() as u64,
            by_status,
            total_value,
        })
    }

    /// Checks whether an order number is already taken.
    pub async fn order_number_exists(&self, order_number: &str) -> Result<bool, ServiceError> {
        let db = &*self.db_pool;
        let count = OrderEntity::find()
            .filter(sales_order::Column::OrderNumber.eq(order_number))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}

fn model_to_response(model: OrderModel) -> OrderResponse {
    let items = json_field::decode_or_default("items", model.items.as_ref());
    OrderResponse {
        id: model.id,
        order_number: model.order_number,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        po_number: model.po_number,
        status: model.status,
        total_amount: model.total_amount,
        items,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
