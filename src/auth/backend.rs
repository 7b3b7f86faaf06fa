use async_trait::async_trait;

use crate::app::FirebaseApp;
use crate::auth::error::AuthResult;
use crate::auth::model::UserCredential;
use crate::auth::oauth::OAuthProvider;

/// The identity service that actually performs sign-in.
///
/// [`crate::auth::Auth`] forwards every sign-in call here and returns the
/// outcome untouched. [`crate::auth::IdentityToolkitBackend`] talks to the
/// Firebase Auth REST API; tests substitute stubs.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthBackend: Send + Sync {
    async fn sign_in_anonymously(&self, app: &FirebaseApp) -> AuthResult<UserCredential>;

    async fn sign_in_with_popup(
        &self,
        app: &FirebaseApp,
        provider: &OAuthProvider,
    ) -> AuthResult<UserCredential>;
}
