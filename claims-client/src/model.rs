use serde::{Deserialize, Serialize};
use std::fmt;

/// Status tag of a claim. The backend owns the vocabulary; tags this client
/// does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Submitted,
    Validated,
    PendingManualReview,
    RootCauseIdentified,
    Resolved,
    EscalatedToOps,
    Other(String),
}

impl ClaimStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Validated => "validated",
            ClaimStatus::PendingManualReview => "pending_manual_review",
            ClaimStatus::RootCauseIdentified => "root_cause_identified",
            ClaimStatus::Resolved => "resolved",
            ClaimStatus::EscalatedToOps => "escalated_to_ops",
            ClaimStatus::Other(tag) => tag,
        }
    }
}

impl From<String> for ClaimStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "submitted" => ClaimStatus::Submitted,
            "validated" => ClaimStatus::Validated,
            "pending_manual_review" => ClaimStatus::PendingManualReview,
            "root_cause_identified" => ClaimStatus::RootCauseIdentified,
            "resolved" => ClaimStatus::Resolved,
            "escalated_to_ops" => ClaimStatus::EscalatedToOps,
            _ => ClaimStatus::Other(tag),
        }
    }
}

impl From<&str> for ClaimStatus {
    fn from(tag: &str) -> Self {
        ClaimStatus::from(tag.to_string())
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the backend-maintained audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: String,
    pub action: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// A claim as returned by the backend. The client never edits one in place;
/// cached copies are swapped for whatever the server returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: i64,
    pub customer_id: String,
    pub description: String,
    pub status: ClaimStatus,
    pub submission_date: String,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(default)]
    pub resolution_type: Option<String>,
    #[serde(default)]
    pub refund_amount: Option<f64>,
    #[serde(default)]
    pub audit_log: Vec<AuditLogEntry>,
}

/// Body of `POST /claims/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub customer_id: String,
    pub description: String,
}

/// Body of `PUT /claims/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ClaimStatus,
}

/// Error body the backend attaches to non-success responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_and_unknown_status_tags() {
        let known: ClaimStatus = serde_json::from_value(json!("root_cause_identified")).unwrap();
        assert_eq!(known, ClaimStatus::RootCauseIdentified);

        let unknown: ClaimStatus = serde_json::from_value(json!("rejected")).unwrap();
        assert_eq!(unknown, ClaimStatus::Other("rejected".to_string()));
        assert_eq!(serde_json::to_value(&unknown).unwrap(), json!("rejected"));
    }

    #[test]
    fn test_claim_defaults_optional_backend_fields() {
        let claim: Claim = serde_json::from_value(json!({
            "id": 7,
            "customer_id": "WAYTOO-CUST-007",
            "description": "Damaged hinge",
            "status": "submitted",
            "submission_date": "2025-06-01T10:15:00"
        }))
        .unwrap();

        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert!(claim.root_cause.is_none());
        assert!(claim.refund_amount.is_none());
        assert!(claim.audit_log.is_empty());
    }

    #[test]
    fn test_status_update_body_shape() {
        let body = StatusUpdate {
            status: ClaimStatus::Resolved,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": "resolved" })
        );
    }
}
