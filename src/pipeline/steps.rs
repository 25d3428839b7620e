//! The eight-step sales pipeline as a compile-time constant table.
//!
//! Step identities, count, and ordering are fixed; they are not stored in the
//! database and not configurable. Every tracker row and detail table is keyed
//! by one of these entries.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Stable wire identifier for a pipeline step.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    ToSchema,
)]
pub enum StepKey {
    #[serde(rename = "clientPO")]
    #[strum(serialize = "clientPO")]
    ClientPo,
    #[serde(rename = "salesOrder")]
    #[strum(serialize = "salesOrder")]
    SalesOrder,
    #[serde(rename = "designEngineering")]
    #[strum(serialize = "designEngineering")]
    DesignEngineering,
    #[serde(rename = "materialRequirements")]
    #[strum(serialize = "materialRequirements")]
    MaterialRequirements,
    #[serde(rename = "productionPlan")]
    #[strum(serialize = "productionPlan")]
    ProductionPlan,
    #[serde(rename = "qualityCheck")]
    #[strum(serialize = "qualityCheck")]
    QualityCheck,
    #[serde(rename = "shipment")]
    #[strum(serialize = "shipment")]
    Shipment,
    #[serde(rename = "delivery")]
    #[strum(serialize = "delivery")]
    Delivery,
}

/// Lifecycle status of a step tracker row.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "in_progress")]
    InProgress,
    #[strum(serialize = "completed")]
    Completed,
    #[strum(serialize = "on_hold")]
    OnHold,
    #[strum(serialize = "approved")]
    Approved,
    #[strum(serialize = "rejected")]
    Rejected,
}

/// One row of the constant step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StepInfo {
    /// Position in the pipeline, 1-based.
    pub id: i32,
    pub key: StepKey,
    pub name: &'static str,
    pub display_name: &'static str,
}

pub const PIPELINE_STEPS: [StepInfo; 8] = [
    StepInfo {
        id: 1,
        key: StepKey::ClientPo,
        name: "Client PO",
        display_name: "Client PO Information",
    },
    StepInfo {
        id: 2,
        key: StepKey::SalesOrder,
        name: "Sales Order",
        display_name: "Sales Order Details",
    },
    StepInfo {
        id: 3,
        key: StepKey::DesignEngineering,
        name: "Design Engineering",
        display_name: "Design & Engineering",
    },
    StepInfo {
        id: 4,
        key: StepKey::MaterialRequirements,
        name: "Material Requirements",
        display_name: "Material Requirements",
    },
    StepInfo {
        id: 5,
        key: StepKey::ProductionPlan,
        name: "Production Plan",
        display_name: "Production Plan",
    },
    StepInfo {
        id: 6,
        key: StepKey::QualityCheck,
        name: "Quality Check",
        display_name: "Quality Control",
    },
    StepInfo {
        id: 7,
        key: StepKey::Shipment,
        name: "Shipment",
        display_name: "Shipment Details",
    },
    StepInfo {
        id: 8,
        key: StepKey::Delivery,
        name: "Delivery",
        display_name: "Delivery Information",
    },
];

/// Fixed number of pipeline steps. Used as the progress denominator.
pub const TOTAL_STEPS: usize = PIPELINE_STEPS.len();

/// Looks up a step by its stable key.
pub fn step_by_key(key: StepKey) -> &'static StepInfo {
    // The table covers every enum variant, so this cannot miss.
    PIPELINE_STEPS
        .iter()
        .find(|s| s.key == key)
        .expect("step table covers all keys")
}

/// Looks up a step by its 1-based position.
pub fn step_by_id(id: i32) -> Option<&'static StepInfo> {
    PIPELINE_STEPS.iter().find(|s| s.id == id)
}

/// Parses a wire key string, e.g. `"clientPO"`.
pub fn parse_step_key(raw: &str) -> Option<&'static StepInfo> {
    raw.parse::<StepKey>().ok().map(step_by_key)
}

pub fn next_step(current_id: i32) -> Option<&'static StepInfo> {
    step_by_id(current_id + 1)
}

pub fn previous_step(current_id: i32) -> Option<&'static StepInfo> {
    step_by_id(current_id - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn table_is_dense_and_ordered() {
        assert_eq!(TOTAL_STEPS, 8);
        for (idx, step) in PIPELINE_STEPS.iter().enumerate() {
            assert_eq!(step.id, idx as i32 + 1);
        }
    }

    #[test]
    fn every_key_resolves() {
        for key in StepKey::iter() {
            let info = step_by_key(key);
            assert_eq!(info.key, key);
            assert_eq!(parse_step_key(key.as_ref()).map(|s| s.id), Some(info.id));
        }
    }

    #[test]
    fn wire_keys_are_stable() {
        assert_eq!(StepKey::ClientPo.as_ref(), "clientPO");
        assert_eq!(parse_step_key("materialRequirements").map(|s| s.id), Some(4));
        assert!(parse_step_key("paintShop").is_none());
    }

    #[test]
    fn next_and_previous_walk_the_table() {
        assert_eq!(next_step(1).map(|s| s.key), Some(StepKey::SalesOrder));
        assert_eq!(previous_step(8).map(|s| s.key), Some(StepKey::Shipment));
        assert!(next_step(8).is_none());
        assert!(previous_step(1).is_none());
    }

    #[test]
    fn status_round_trips_through_wire_format() {
        assert_eq!(StepStatus::InProgress.as_ref(), "in_progress");
        assert_eq!("on_hold".parse::<StepStatus>().ok(), Some(StepStatus::OnHold));
        assert!("shipped".parse::<StepStatus>().is_err());
    }
}
