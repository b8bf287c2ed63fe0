//! Shared-secret check for internal calls.

use super::dto::Headers;
use super::RpcError;

/// Header carrying the internal shared secret.
pub const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";
/// Header carrying the caller-asserted dispatch role.
pub const DISPATCH_ROLE_HEADER: &str = "x-dispatch-role";

#[derive(Clone)]
pub struct InternalCredential {
    secret: String,
}

impl std::fmt::Debug for InternalCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalCredential").finish_non_exhaustive()
    }
}

impl InternalCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, headers: &Headers) -> Result<(), RpcError> {
        let provided = headers
            .get(INTERNAL_SECRET_HEADER)
            .ok_or(RpcError::UnauthorizedInternal)?;
        if constant_time_eq(self.secret.as_bytes(), provided.as_bytes()) {
            Ok(())
        } else {
            Err(RpcError::UnauthorizedInternal)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
