mod credential;
mod pkce;
mod provider;
mod providers;

pub use credential::build_post_body;
pub use pkce::PkcePair;
pub use provider::OAuthProvider;
pub use providers::GoogleAuthProvider;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::auth::error::AuthResult;
use crate::auth::model::AuthCredential;

/// Parameters needed to open a provider's authorization page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRequest {
    /// Provider identifier (e.g. `google.com`).
    pub provider_id: String,
    /// Fully qualified authorization URL.
    pub auth_url: String,
    pub language_code: Option<String>,
    pub custom_parameters: BTreeMap<String, String>,
    pub pkce: Option<PkcePair>,
}

impl OAuthRequest {
    pub fn pkce(&self) -> Option<&PkcePair> {
        self.pkce.as_ref()
    }
}

/// Runs the interactive part of a popup sign-in.
///
/// Implementations open a window (browser popup, system browser, embedded
/// web view), complete the authorization handshake and return the provider
/// response. Refusals and user aborts are reported as
/// [`crate::auth::PopupError`] wrapped in [`crate::auth::AuthError::Popup`].
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait OAuthPopupHandler: Send + Sync {
    async fn open_popup(&self, request: OAuthRequest) -> AuthResult<AuthCredential>;
}
