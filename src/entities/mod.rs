pub mod client_po_detail;
pub mod delivery_detail;
pub mod design_engineering_detail;
pub mod inward_challan;
pub mod material_requirements_detail;
pub mod outward_challan;
pub mod production_phase_detail;
pub mod production_phase_tracking;
pub mod production_plan_detail;
pub mod quality_check_detail;
pub mod sales_order;
pub mod sales_order_detail;
pub mod sales_order_step;
pub mod shipment_detail;
