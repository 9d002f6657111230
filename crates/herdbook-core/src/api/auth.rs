//! Authentication endpoints: login, profile, logout.
//!
//! Token refresh is internal to the client (`api::client`); it is not a
//! public endpoint method.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::User;

use super::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenPair {
    access: String,
    refresh: String,
}

impl ApiClient {
    /// Exchange credentials for a token pair, then fetch and store the
    /// account profile. Tokens land in the session store first so the
    /// profile request can authenticate with them.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let tokens: TokenPair = self
            .post("auth/login/", &LoginRequest { username, password })
            .await?;
        self.session().set_session(tokens.access, tokens.refresh);

        let user = self.me().await?;
        info!(username = %user.username, "logged in");
        Ok(user)
    }

    /// Fetch the current account profile and store it in the session.
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.get("auth/me/", Vec::new()).await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Drop the session. The API has no logout endpoint; clearing the
    /// store is the whole operation.
    pub fn logout(&self) {
        self.session().clear();
        info!("logged out");
    }
}
