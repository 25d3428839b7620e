//! Typed shapes for the free-form JSON sub-objects carried by detail records.
//!
//! These are deliberately all-optional: clients fill detail records in over
//! several partial submissions, and older rows may predate newer fields. The
//! permissive decode in [`json_field`] means a malformed stored blob reads
//! back as the type's default.

pub mod json_field;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A line item on the root sales order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// Metadata tuple for an uploaded document. Upload mechanics live elsewhere;
/// only the resulting descriptor is persisted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub name: Option<String>,
    pub path: Option<String>,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Commercial terms captured on the client PO.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TermsConditions {
    pub payment_terms: Option<String>,
    pub delivery_terms: Option<String>,
    pub warranty_terms: Option<String>,
    pub penalty_clauses: Option<String>,
}

/// Engineering requirements stated by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequirements {
    pub capacity: Option<String>,
    pub span: Option<String>,
    pub lift_height: Option<String>,
    pub duty_class: Option<String>,
    pub power_supply: Option<String>,
    #[serde(default)]
    pub special_features: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub model: Option<String>,
    pub capacity: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityCompliance {
    #[serde(default)]
    pub standards: Vec<String>,
    pub inspection_required: Option<bool>,
    #[serde(default)]
    pub documentation: Vec<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantySupport {
    pub warranty_period: Option<String>,
    pub service_support: Option<String>,
    pub spares_availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InternalInfo {
    pub project_owner: Option<String>,
    pub department: Option<String>,
    pub priority: Option<String>,
}

/// A design document reference (QAP, ATP, drawings, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    pub doc_type: Option<String>,
    #[serde(flatten)]
    pub file: AttachmentMeta,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub item_code: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
}

/// One material requirement line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub name: Option<String>,
    pub material_type: Option<String>,
    pub grade: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Planned production timeline for the production-plan step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanTimeline {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Material handed to a vendor alongside an outsourced phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhaseMaterialInfo {
    pub material: Option<String>,
    pub grade: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_ignored_on_decode() {
        let value = serde_json::json!({
            "capacity": "10t",
            "colour": "yellow"
        });
        let req: ProjectRequirements = json_field::decode_or_default("projectRequirements", Some(&value));
        assert_eq!(req.capacity.as_deref(), Some("10t"));
        assert!(req.special_features.is_empty());
    }

    #[test]
    fn material_list_round_trips() {
        let materials = vec![MaterialItem {
            name: Some("MS Plate".into()),
            quantity: Some(Decimal::new(125, 1)),
            unit: Some("kg".into()),
            ..Default::default()
        }];
        let value = json_field::encode("materials", &materials);
        let back: Vec<MaterialItem> = json_field::decode_or_default("materials", Some(&value));
        assert_eq!(back, materials);
    }
}
