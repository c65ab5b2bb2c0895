use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Verified identity of the caller, attached to every request that passed
/// token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub expires_at: OffsetDateTime,
}

impl TryFrom<&Claims> for AuthContext {
    type Error = time::error::ComponentRange;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.sub,
            expires_at: OffsetDateTime::from_unix_timestamp(claims.exp as i64)?,
        })
    }
}
