//! Production-phase lifecycle vocabulary.
//!
//! Phase statuses use human-readable wire strings ("Not Started", "In
//! Progress", …) because downstream portals render them verbatim.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle state of a production phase tracking row.
///
/// `OnHold` and `Cancelled` are reachable from any state; hold/cancel are
/// escape hatches and carry no transition guard.
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
pub enum PhaseStatus {
    #[serde(rename = "Not Started")]
    #[strum(serialize = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    #[strum(serialize = "On Hold")]
    OnHold,
    #[serde(rename = "Outsourced")]
    #[strum(serialize = "Outsourced")]
    Outsourced,
    #[serde(rename = "Completed")]
    #[strum(serialize = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    #[strum(serialize = "Cancelled")]
    Cancelled,
}

/// Whether a phase is executed in-house or handed to an external vendor.
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
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    #[strum(serialize = "inhouse")]
    Inhouse,
    #[strum(serialize = "outsourced")]
    Outsourced,
}

impl Default for ProcessType {
    fn default() -> Self {
        ProcessType::Inhouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_status_wire_strings() {
        assert_eq!(PhaseStatus::NotStarted.as_ref(), "Not Started");
        assert_eq!(
            "Outsourced".parse::<PhaseStatus>().ok(),
            Some(PhaseStatus::Outsourced)
        );
        assert!("Paused".parse::<PhaseStatus>().is_err());
    }

    #[test]
    fn process_type_defaults_to_inhouse() {
        assert_eq!(ProcessType::default(), ProcessType::Inhouse);
        assert_eq!("outsourced".parse::<ProcessType>().ok(), Some(ProcessType::Outsourced));
    }
}
