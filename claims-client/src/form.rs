use crate::{
    error::{ClaimsError, Result},
    model::NewClaim,
};

/// The two text fields of the submission form.
///
/// Values are kept exactly as typed; they are cleared only after the backend
/// accepted a submission, so a failed attempt can be retried as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimForm {
    customer_id: String,
    description: String,
}

impl ClaimForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_id(&mut self, value: impl Into<String>) {
        self.customer_id = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Required-field gate. Empty fields never reach the network.
    pub fn validate(&self) -> Result<NewClaim> {
        if self.customer_id.is_empty() {
            return Err(ClaimsError::MissingField("customer_id"));
        }
        if self.description.is_empty() {
            return Err(ClaimsError::MissingField("description"));
        }
        Ok(NewClaim {
            customer_id: self.customer_id.clone(),
            description: self.description.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.customer_id.clear();
        self.description.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keeps_values_verbatim() {
        let mut form = ClaimForm::new();
        form.set_customer_id(" WAYTOO-CUST-001");
        form.set_description("Missing screw ");

        let body = form.validate().unwrap();
        assert_eq!(body.customer_id, " WAYTOO-CUST-001");
        assert_eq!(body.description, "Missing screw ");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut form = ClaimForm::new();
        form.set_description("Missing screw");
        assert!(matches!(
            form.validate(),
            Err(ClaimsError::MissingField("customer_id"))
        ));

        form.set_customer_id("WAYTOO-CUST-001");
        form.set_description("");
        assert!(matches!(
            form.validate(),
            Err(ClaimsError::MissingField("description"))
        ));
    }

    #[test]
    fn test_validate_accepts_whitespace_only_values() {
        let mut form = ClaimForm::new();
        form.set_customer_id(" ");
        form.set_description("Missing screw");

        let body = form.validate().unwrap();
        assert_eq!(body.customer_id, " ");
    }

    #[test]
    fn test_clear() {
        let mut form = ClaimForm::new();
        form.set_customer_id("a");
        form.set_description("b");
        form.clear();
        assert_eq!(form, ClaimForm::default());
    }
}
