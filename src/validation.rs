//! Advisory payload checks for step submissions.
//!
//! These never block a write. Operators routinely save half-finished step
//! data, so a failed check is surfaced as a warning next to the stored row
//! rather than a rejected request.

use crate::services::step_details::{
    ClientPoRequest, DesignEngineeringRequest, MaterialRequirementsRequest,
    SalesOrderDetailRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn looks_like_email(value: &str) -> bool {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

pub fn validate_client_po(request: &ClientPoRequest) -> ValidationOutcome {
    let mut errors = Vec::new();

    if is_blank(&request.po_number) {
        errors.push("PO number is required".to_string());
    }
    if is_blank(&request.client_name) {
        errors.push("Client name is required".to_string());
    }
    if is_blank(&request.client_email) {
        errors.push("Client email is required".to_string());
    } else if !looks_like_email(&request.client_email) {
        errors.push("Client email is not a valid email address".to_string());
    }
    if is_blank(&request.client_phone) {
        errors.push("Client phone is required".to_string());
    }
    if is_blank(&request.project_name) {
        errors.push("Project name is required".to_string());
    }

    ValidationOutcome::from_errors(errors)
}

pub fn validate_sales_order_detail(request: &SalesOrderDetailRequest) -> ValidationOutcome {
    let mut errors = Vec::new();

    if let Some(email) = &request.client_email {
        if !is_blank(email) && !looks_like_email(email) {
            errors.push("Client email is not a valid email address".to_string());
        }
    }
    if request.product_details.is_none() {
        errors.push("Product details are missing".to_string());
    }

    ValidationOutcome::from_errors(errors)
}

pub fn validate_design_engineering(request: &DesignEngineeringRequest) -> ValidationOutcome {
    let mut errors = Vec::new();

    if request.documents.is_empty() {
        errors.push("At least one design document is expected".to_string());
    }
    for (idx, doc) in request.documents.iter().enumerate() {
        if doc.file.path.as_deref().map_or(true, is_blank) {
            errors.push(format!("Document {} has no file path", idx + 1));
        }
    }

    ValidationOutcome::from_errors(errors)
}

pub fn validate_material_requirements(request: &MaterialRequirementsRequest) -> ValidationOutcome {
    let mut errors = Vec::new();

    if request.materials.is_empty() {
        errors.push("At least one material line is expected".to_string());
    }
    for (idx, line) in request.materials.iter().enumerate() {
        if line.name.as_deref().map_or(true, is_blank) {
            errors.push(format!("Material {} has no name", idx + 1));
        }
        if line.quantity.is_none() {
            errors.push(format!("Material {} has no quantity", idx + 1));
        }
    }

    ValidationOutcome::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttachmentMeta, DesignDocument, MaterialItem};
    use rust_decimal_macros::dec;

    #[test]
    fn complete_client_po_passes() {
        let request = ClientPoRequest {
            po_number: "PO-1001".into(),
            client_name: "Acme Industries".into(),
            client_email: "buyer@acme.example".into(),
            client_phone: "+91 98765 43210".into(),
            project_name: "Gantry crane".into(),
            project_code: "GC-22".into(),
            ..Default::default()
        };
        let outcome = validate_client_po(&request);
        assert!(outcome.is_valid, "errors: {:?}", outcome.errors);
    }

    #[test]
    fn bad_email_is_flagged_but_other_fields_still_checked() {
        let request = ClientPoRequest {
            po_number: "PO-1001".into(),
            client_email: "not-an-email".into(),
            ..Default::default()
        };
        let outcome = validate_client_po(&request);
        assert!(!outcome.is_valid);
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.contains("valid email address")));
        assert!(outcome.errors.iter().any(|e| e.contains("Client name")));
    }

    #[test]
    fn design_documents_need_a_path() {
        let request = DesignEngineeringRequest {
            documents: vec![DesignDocument {
                doc_type: Some("QAP".into()),
                file: AttachmentMeta::default(),
                verified: None,
            }],
            ..Default::default()
        };
        let outcome = validate_design_engineering(&request);
        assert_eq!(outcome.errors, vec!["Document 1 has no file path"]);
    }

    #[test]
    fn material_lines_need_name_and_quantity() {
        let request = MaterialRequirementsRequest {
            materials: vec![
                MaterialItem {
                    name: Some("MS Plate".into()),
                    quantity: Some(dec!(12)),
                    ..Default::default()
                },
                MaterialItem::default(),
            ],
            ..Default::default()
        };
        let outcome = validate_material_requirements(&request);
        assert_eq!(
            outcome.errors,
            vec!["Material 2 has no name", "Material 2 has no quantity"]
        );
    }
}
