pub mod challans;
pub mod orders;
pub mod phases;
pub mod steps;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{
        challans::ChallanService, production_phases::ProductionPhaseService,
        sales_orders::SalesOrderService, step_details::StepDetailService,
        step_tracker::StepTrackerService,
    },
};
use std::sync::Arc;

/// Shared service handles, cloned into every handler via AppState.
#[derive(Clone)]
pub struct AppServices {
    pub orders: Arc<SalesOrderService>,
    pub step_details: Arc<StepDetailService>,
    pub step_tracker: Arc<StepTrackerService>,
    pub phases: Arc<ProductionPhaseService>,
    pub challans: Arc<ChallanService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            orders: Arc::new(SalesOrderService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            step_details: Arc::new(StepDetailService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            step_tracker: Arc::new(StepTrackerService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            phases: Arc::new(ProductionPhaseService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            challans: Arc::new(ChallanService::new(db_pool, event_sender)),
        }
    }
}
