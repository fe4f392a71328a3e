use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    api::ClaimsApi,
    cache::{CacheUpdate, ClaimList},
    error::{ClaimsError, Result},
    form::ClaimForm,
    model::{Claim, ClaimStatus},
    workflow::{ClaimAction, Transition, TransitionTable},
};

pub const LIST_LOAD_ERROR: &str = "Failed to load claims. Please check the backend server.";

/// What the dashboard is currently waiting on. Anything but `Idle` disables the
/// submit button and every row action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Loading,
    Submitting,
    Validating(i64),
    Updating(i64),
}

/// Feedback line shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// One dashboard session: the cached claim list, the submission form, the
/// feedback lines and the busy state, kept consistent with the backend.
pub struct Dashboard {
    api: Arc<dyn ClaimsApi>,
    table: TransitionTable,
    claims: ClaimList,
    form: ClaimForm,
    activity: Activity,
    notice: Option<Notice>,
    list_error: Option<String>,
    action_error: Option<String>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ClaimsApi>) -> Self {
        Self::with_table(api, TransitionTable::default())
    }

    pub fn with_table(api: Arc<dyn ClaimsApi>, table: TransitionTable) -> Self {
        Self {
            api,
            table,
            claims: ClaimList::new(),
            form: ClaimForm::new(),
            activity: Activity::Idle,
            notice: None,
            list_error: None,
            action_error: None,
        }
    }

    pub fn claims(&self) -> &ClaimList {
        &self.claims
    }

    pub fn form(&self) -> &ClaimForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ClaimForm {
        &mut self.form
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn is_busy(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    /// Error line left by the last failed submit or row action. It stays above
    /// the claim table until the next list load.
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Row actions to offer for `claim`
    pub fn actions_for(&self, claim: &Claim) -> Vec<ClaimAction> {
        self.table.actions_for(&claim.status)
    }

    /// Refresh the whole list. Not gated by the busy state; a failure keeps the
    /// previous list and sets the list error.
    pub async fn load(&mut self) -> Result<usize> {
        let resume = self.activity.clone();
        if resume == Activity::Idle {
            self.activity = Activity::Loading;
        }
        self.list_error = None;
        self.action_error = None;

        let outcome = self.api.list_claims().await;
        self.activity = resume;

        match outcome {
            Ok(claims) => {
                let count = claims.len();
                self.claims.replace_all(claims);
                info!(count, "Loaded claims");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch claims");
                self.list_error = Some(LIST_LOAD_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Submit the form. The fields are cleared only when the backend accepts it.
    pub async fn submit(&mut self) -> Result<Claim> {
        self.ensure_idle()?;
        let new_claim = self.form.validate()?;

        self.activity = Activity::Submitting;
        self.notice = None;
        let outcome = self.api.create_claim(&new_claim).await;
        self.activity = Activity::Idle;

        match outcome {
            Ok(claim) => {
                info!(claim_id = claim.id, status = %claim.status, "Claim submitted");
                self.form.clear();
                self.claims.insert_at_front(claim.clone());
                self.notice = Some(Notice::success("Claim submitted successfully!"));
                Ok(claim)
            }
            Err(e) => {
                error!(error = %e, "Failed to submit claim");
                self.notice = Some(Notice::failure(format!("Error submitting claim: {e}")));
                self.action_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Trigger a row action, provided the claim's cached status offers it
    pub async fn dispatch(&mut self, id: i64, action: ClaimAction) -> Result<Claim> {
        self.ensure_idle()?;
        let claim = self.claims.get(id).ok_or(ClaimsError::UnknownClaim(id))?;
        if !self.table.is_available(&claim.status, action) {
            return Err(ClaimsError::ActionUnavailable {
                status: claim.status.clone(),
                action,
            });
        }

        match action.transition() {
            Transition::Ai => self.validate(id).await,
            Transition::Manual(target) => self.set_status(id, target).await,
        }
    }

    /// Ask the backend to validate a claim. Whatever status comes back wins.
    pub async fn validate(&mut self, id: i64) -> Result<Claim> {
        self.ensure_idle()?;

        self.activity = Activity::Validating(id);
        self.notice = None;
        let outcome = self.api.validate_claim(id).await;
        self.activity = Activity::Idle;

        match outcome {
            Ok(claim) => {
                info!(claim_id = id, status = %claim.status, "Claim validated");
                self.notice = Some(Notice::success(format!(
                    "Claim {id} validated by AI! New status: \"{}\"",
                    claim.status
                )));
                self.patch(id, claim.clone());
                Ok(claim)
            }
            Err(e) => {
                error!(claim_id = id, error = %e, "Failed to validate claim");
                self.notice = Some(Notice::failure(format!(
                    "Error validating claim {id}: {e}"
                )));
                self.action_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Move a claim to `status` by hand
    pub async fn set_status(&mut self, id: i64, status: ClaimStatus) -> Result<Claim> {
        self.ensure_idle()?;

        self.activity = Activity::Updating(id);
        self.notice = None;
        let outcome = self.api.update_status(id, &status).await;
        self.activity = Activity::Idle;

        match outcome {
            Ok(claim) => {
                info!(claim_id = id, status = %claim.status, "Claim status updated");
                self.notice = Some(Notice::success(format!(
                    "Claim {id} status updated to \"{status}\"!"
                )));
                self.patch(id, claim.clone());
                Ok(claim)
            }
            Err(e) => {
                error!(claim_id = id, error = %e, "Failed to update claim status");
                self.notice = Some(Notice::failure(format!(
                    "Error updating claim {id} status: {e}"
                )));
                self.action_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch a single claim without touching the cached list
    pub async fn fetch(&self, id: i64) -> Result<Claim> {
        self.api.get_claim(id).await
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            return Err(ClaimsError::Busy);
        }
        Ok(())
    }

    /// Swap the cached entry for the server's copy. A claim the list does not
    /// know yet is shown at the top.
    fn patch(&mut self, id: i64, claim: Claim) {
        if self.claims.replace_by_id(id, claim.clone()) == CacheUpdate::Missing {
            warn!(claim_id = id, "Updated claim was not in the list; inserting it");
            self.claims.insert_at_front(claim);
        }
    }
}
