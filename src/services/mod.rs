pub mod challans;
pub mod production_phases;
pub mod sales_orders;
pub mod step_details;
pub mod step_tracker;
