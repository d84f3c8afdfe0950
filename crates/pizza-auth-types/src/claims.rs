use serde::{Deserialize, Serialize};

/// Kind of a caller claim. Only `Role` participates in authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    NameIdentifier,
    Name,
    Role,
}

/// A typed assertion bound to the caller's credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub kind: ClaimKind,
    pub value: String,
}

impl Claim {
    pub fn new(kind: ClaimKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn role(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::Role, value)
    }
}

/// The authenticated caller, as a bag of claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsIdentity {
    claims: Vec<Claim>,
}

impl ClaimsIdentity {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn find_all(&self, kind: ClaimKind) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(move |c| c.kind == kind)
    }

    /// Exact, case-sensitive match against role claims.
    pub fn has_role(&self, role_name: &str) -> bool {
        self.find_all(ClaimKind::Role).any(|c| c.value == role_name)
    }

    /// The numeric user id from the first `NameIdentifier` claim, if it parses.
    pub fn user_id(&self) -> Option<i32> {
        self.find_all(ClaimKind::NameIdentifier)
            .next()
            .and_then(|c| c.value.parse().ok())
    }
}
