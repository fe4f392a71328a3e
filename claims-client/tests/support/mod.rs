//! Fake claims backend served over real HTTP for the integration tests.
#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use claims_client::{AuditLogEntry, Claim, ClaimStatus, NewClaim, StatusUpdate};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request as the fake backend received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct Inner {
    claims: Vec<Claim>,
    requests: Vec<Recorded>,
    failure: Option<(StatusCode, String)>,
    validation_outcome: Option<ClaimStatus>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claims(claims: Vec<Claim>) -> Self {
        let backend = Self::new();
        backend.inner.lock().unwrap().claims = claims;
        backend
    }

    /// Answer every following request with `status` and the raw `body`
    pub fn fail_with(&self, status: StatusCode, body: &str) {
        self.inner.lock().unwrap().failure = Some((status, body.to_string()));
    }

    pub fn validate_to(&self, status: ClaimStatus) {
        self.inner.lock().unwrap().validation_outcome = Some(status);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn claims(&self) -> Vec<Claim> {
        self.inner.lock().unwrap().claims.clone()
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn spawn(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn record(&self, method: &'static str, path: String, headers: HeaderMap, body: Bytes) -> Option<Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(Recorded {
            method,
            path,
            headers,
            body,
        });
        inner
            .failure
            .clone()
            .map(|(status, body)| (status, body).into_response())
    }

    fn update(&self, id: i64, f: impl FnOnce(&mut Claim)) -> Response {
        let mut inner = self.inner.lock().unwrap();
        match inner.claims.iter_mut().find(|c| c.id == id) {
            Some(claim) => {
                f(claim);
                Json(claim.clone()).into_response()
            }
            None => not_found(),
        }
    }
}

pub fn claim(id: i64, status: &str) -> Claim {
    Claim {
        id,
        customer_id: format!("WAYTOO-CUST-{id:03}"),
        description: "Missing screw".to_string(),
        status: ClaimStatus::from(status),
        submission_date: "2025-06-01T10:00:00.000000".to_string(),
        root_cause: None,
        resolution_type: None,
        refund_amount: None,
        audit_log: Vec::new(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": "Claim not found." })),
    )
        .into_response()
}

fn audit(action: String) -> AuditLogEntry {
    AuditLogEntry {
        timestamp: "2025-06-01T11:00:00".to_string(),
        action,
        details: None,
    }
}

fn router(backend: FakeBackend) -> Router {
    Router::new()
        .route("/claims/", get(list_claims).post(create_claim))
        .route("/claims/{id}", get(get_claim))
        .route("/claims/{id}/validate", put(validate_claim))
        .route("/claims/{id}/status", put(update_status))
        .with_state(backend)
}

async fn list_claims(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if let Some(failure) = backend.record("GET", "/claims/".into(), headers, Bytes::new()) {
        return failure;
    }
    Json(backend.claims()).into_response()
}

async fn get_claim(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if let Some(failure) = backend.record("GET", format!("/claims/{id}"), headers, Bytes::new()) {
        return failure;
    }
    backend.update(id, |_| {})
}

async fn create_claim(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = backend.record("POST", "/claims/".into(), headers, body.clone()) {
        return failure;
    }
    let new_claim: NewClaim = match serde_json::from_slice(&body) {
        Ok(new_claim) => new_claim,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let mut inner = backend.inner.lock().unwrap();
    let id = inner.claims.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let created = Claim {
        customer_id: new_claim.customer_id,
        description: new_claim.description,
        audit_log: vec![audit("Claim Submitted".to_string())],
        ..claim(id, "submitted")
    };
    inner.claims.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn validate_claim(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = format!("/claims/{id}/validate");
    if let Some(failure) = backend.record("PUT", path, headers, body) {
        return failure;
    }
    let outcome = backend
        .inner
        .lock()
        .unwrap()
        .validation_outcome
        .clone()
        .unwrap_or(ClaimStatus::Validated);
    backend.update(id, |claim| {
        claim
            .audit_log
            .push(audit(format!("AI Triage/Validation: Status changed to {outcome}")));
        claim.status = outcome;
    })
}

async fn update_status(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = format!("/claims/{id}/status");
    if let Some(failure) = backend.record("PUT", path, headers, body.clone()) {
        return failure;
    }
    let update: StatusUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    backend.update(id, |claim| {
        claim
            .audit_log
            .push(audit(format!("Status Updated to {}", update.status)));
        claim.status = update.status;
    })
}
