pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod model;
pub mod workflow;

// Re-export commonly used types
pub use api::{ClaimsApi, HttpClaimsApi};
pub use cache::{CacheUpdate, ClaimList};
pub use config::ClientConfig;
pub use dashboard::{Activity, Dashboard, LIST_LOAD_ERROR, Notice};
pub use error::{ClaimsError, Result};
pub use form::ClaimForm;
pub use model::{AuditLogEntry, Claim, ClaimStatus, NewClaim, StatusUpdate};
pub use workflow::{ClaimAction, Transition, TransitionTable, TransitionTableBuilder};
