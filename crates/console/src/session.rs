//! The signed-in session: bearer token and current user.

use std::sync::Arc;

use client::{TokenError, TokenStore};

/// Session backed by the local token store.
#[derive(Debug, Clone)]
pub struct Session {
    tokens: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.tokens.token(), Ok(Some(_)))
    }

    /// Id of the signed-in user, decoded from the token claims.
    ///
    /// `None` when signed out or when the token carries no usable id.
    pub fn current_user_id(&self) -> Option<i64> {
        let token = match self.tokens.token() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                return None;
            }
        };
        match shared::jwt::extract_user_id(&token) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Session token has no user id");
                None
            }
        }
    }

    /// Clears the stored token.
    pub fn logout(&self) -> Result<(), TokenError> {
        self.tokens.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
