use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub provider_id: String,
}

/// A signed-in user together with the tokens the backend issued for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    info: UserInfo,
    is_anonymous: bool,
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<Duration>,
}

impl User {
    pub fn new(info: UserInfo) -> Self {
        Self {
            info,
            is_anonymous: false,
            id_token: None,
            refresh_token: None,
            expires_in: None,
        }
    }

    /// Returns the stable Firebase UID for the user.
    pub fn uid(&self) -> &str {
        &self.info.uid
    }

    pub fn info(&self) -> &UserInfo {
        &self.info
    }

    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    pub fn set_anonymous(&mut self, anonymous: bool) {
        self.is_anonymous = anonymous;
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Lifetime of the ID token as reported at sign-in.
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    pub fn with_tokens(
        mut self,
        id_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: Option<Duration>,
    ) -> Self {
        self.id_token = Some(id_token.into());
        self.refresh_token = Some(refresh_token.into());
        self.expires_in = expires_in;
        self
    }
}

/// Result of a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserCredential {
    pub user: Arc<User>,
    pub provider_id: Option<String>,
    pub operation_type: Option<String>,
}

/// Provider response handed back by a popup handler.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthCredential {
    pub provider_id: String,
    pub sign_in_method: String,
    pub token_response: serde_json::Value,
}

#[derive(Debug, Default, Serialize)]
pub struct SignUpRequest {
    #[serde(rename = "returnSecureToken", skip_serializing_if = "Option::is_none")]
    pub return_secure_token: Option<bool>,
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignUpResponse {
    #[serde(rename = "localId")]
    pub local_id: Option<String>,
    #[serde(rename = "idToken")]
    pub id_token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(rename = "expiresIn")]
    pub expires_in: Option<String>,
}
