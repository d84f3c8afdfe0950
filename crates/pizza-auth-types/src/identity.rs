//! Gateway-injected caller identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use crate::claims::{Claim, ClaimKind, ClaimsIdentity};

pub const USER_ID_HEADER: &str = "x-pizza-user-id";
pub const USER_NAME_HEADER: &str = "x-pizza-user-name";
pub const USER_ROLES_HEADER: &str = "x-pizza-user-roles";

/// The caller's identity as forwarded by the gateway, or `None` for
/// anonymous requests.
///
/// `x-pizza-user-id` absent → anonymous. Present but not an integer → 401.
/// `x-pizza-user-roles` is a comma-separated list; blank entries are skipped.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<ClaimsIdentity>);

impl CallerIdentity {
    pub fn identity(&self) -> Option<&ClaimsIdentity> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // parsed up front; the future must not borrow `parts`
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = identity_from_parts(parts);
        async move { result }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn identity_from_parts(parts: &Parts) -> Result<CallerIdentity, StatusCode> {
    let Some(raw_id) = header(parts, USER_ID_HEADER) else {
        return Ok(CallerIdentity(None));
    };
    let user_id = raw_id.trim().parse::<i32>().map_err(|_| {
        tracing::debug!(header = USER_ID_HEADER, "rejecting malformed user id");
        StatusCode::UNAUTHORIZED
    })?;

    let mut identity = ClaimsIdentity::default();
    identity.add_claim(Claim::new(ClaimKind::NameIdentifier, user_id.to_string()));
    if let Some(name) = header(parts, USER_NAME_HEADER) {
        identity.add_claim(Claim::new(ClaimKind::Name, name));
    }
    if let Some(roles) = header(parts, USER_ROLES_HEADER) {
        roles
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .for_each(|r| identity.add_claim(Claim::role(r)));
    }
    Ok(CallerIdentity(Some(identity)))
}
