use crate::model::Claim;

/// Outcome of patching the cache with a server-returned claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheUpdate {
    Replaced,
    /// No cached entry had the id; the cache was left untouched
    Missing,
}

/// Ordered copy of the claims last observed from the backend.
///
/// The list mirrors server state and is never the source of truth: entries are
/// only ever swapped wholesale for the server's representation.
#[derive(Debug, Clone, Default)]
pub struct ClaimList {
    claims: Vec<Claim>,
}

impl ClaimList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, keeping the server's order
    pub fn replace_all(&mut self, claims: Vec<Claim>) {
        self.claims = claims;
    }

    pub fn insert_at_front(&mut self, claim: Claim) {
        self.claims.insert(0, claim);
    }

    pub fn replace_by_id(&mut self, id: i64, claim: Claim) -> CacheUpdate {
        match self.claims.iter_mut().find(|cached| cached.id == id) {
            Some(slot) => {
                *slot = claim;
                CacheUpdate::Replaced
            }
            None => CacheUpdate::Missing,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Claim> {
        self.claims.iter().find(|claim| claim.id == id)
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
