use std::sync::Arc;

use crate::app::{initialize_app, FirebaseApp, FirebaseOptions};
use crate::auth::api::Auth;
use crate::auth::backend::AuthBackend;
use crate::auth::error::AuthResult;
use crate::auth::model::UserCredential;
use crate::auth::oauth::{GoogleAuthProvider, OAuthProvider};

/// Ready-to-use authentication entry points for UI code.
///
/// Bundles the client handle with a pre-configured Google provider so callers
/// never deal with provider configuration. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct AuthFacade {
    auth: Arc<Auth>,
    google_provider: OAuthProvider,
}

impl AuthFacade {
    pub fn new(auth: Arc<Auth>) -> Self {
        Self {
            auth,
            google_provider: GoogleAuthProvider::new(),
        }
    }

    /// Validates `options`, initializes the app and binds it to `backend`.
    pub fn initialize(options: FirebaseOptions, backend: Arc<dyn AuthBackend>) -> AuthResult<Self> {
        let app = initialize_app(options, None)?;
        Self::for_app(app, backend)
    }

    /// Same as [`AuthFacade::initialize`] with options read from the environment.
    pub fn from_env(backend: Arc<dyn AuthBackend>) -> AuthResult<Self> {
        let options = FirebaseOptions::from_env()?;
        Self::initialize(options, backend)
    }

    pub fn for_app(app: FirebaseApp, backend: Arc<dyn AuthBackend>) -> AuthResult<Self> {
        let auth = Auth::builder(app).with_backend(backend).build()?;
        Ok(Self::new(auth))
    }

    pub fn client_handle(&self) -> Arc<Auth> {
        Arc::clone(&self.auth)
    }

    /// The pre-configured Google provider.
    pub fn provider_descriptor(&self) -> &OAuthProvider {
        &self.google_provider
    }

    pub async fn sign_in_anonymously(&self) -> AuthResult<UserCredential> {
        self.auth.sign_in_anonymously().await
    }

    /// Runs popup sign-in with `provider`, or the Google provider when `None`.
    pub async fn sign_in_with_popup(&self, provider: Option<&OAuthProvider>) -> AuthResult<UserCredential> {
        let provider = provider.unwrap_or(&self.google_provider);
        self.auth.sign_in_with_popup(provider).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::app::AppError;
    use crate::auth::error::AuthError;
    use crate::test_support::{credential_for_uid, test_options, StubBackend};

    #[tokio::test(flavor = "current_thread")]
    async fn popup_defaults_to_google_provider() {
        let backend = StubBackend::new(Ok(credential_for_uid("a")), Ok(credential_for_uid("abc")));
        let facade = AuthFacade::initialize(test_options("key"), backend.clone()).unwrap();

        let credential = facade.sign_in_with_popup(None).await.unwrap();

        assert_eq!(credential.user.uid(), "abc");
        assert_eq!(backend.popup_calls(), vec![GoogleAuthProvider::new()]);
        assert_eq!(facade.provider_descriptor().provider_id(), "google.com");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn explicit_provider_is_forwarded() {
        let backend = StubBackend::new(Ok(credential_for_uid("a")), Ok(credential_for_uid("b")));
        let facade = AuthFacade::initialize(test_options("key"), backend.clone()).unwrap();
        let mut provider = GoogleAuthProvider::new();
        GoogleAuthProvider::add_login_hint(&mut provider, "user@example.com");

        facade.sign_in_with_popup(Some(&provider)).await.unwrap();

        assert_eq!(backend.popup_calls(), vec![provider]);
    }

    #[test]
    fn client_handle_is_stable() {
        let backend = StubBackend::new(Ok(credential_for_uid("a")), Ok(credential_for_uid("b")));
        let facade = AuthFacade::initialize(test_options("key"), backend).unwrap();
        assert!(Arc::ptr_eq(&facade.client_handle(), &facade.client_handle()));
        let copy = facade.clone();
        assert!(Arc::ptr_eq(&facade.client_handle(), &copy.client_handle()));
    }

    #[test]
    fn from_env_builds_the_default_app() {
        let backend = StubBackend::new(Ok(credential_for_uid("a")), Ok(credential_for_uid("b")));
        std::env::set_var(
            "FIREBASE_CONFIG",
            r#"{"apiKey":"env-key","authDomain":"env.firebaseapp.com","projectId":"env","appId":"1:2:web:3"}"#,
        );
        let result = AuthFacade::from_env(backend.clone());
        std::env::remove_var("FIREBASE_CONFIG");

        let facade = result.unwrap();
        let initialized = AuthFacade::initialize(test_options("key"), backend).unwrap();
        let app = facade.client_handle().app().clone();
        assert_eq!(app.name(), crate::app::DEFAULT_ENTRY_NAME);
        assert_eq!(app.name(), initialized.client_handle().app().name());
        assert_eq!(app.options().api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn initialize_fails_fast_on_empty_api_key() {
        let backend = StubBackend::new(Ok(credential_for_uid("a")), Ok(credential_for_uid("b")));
        let mut options = test_options("key");
        options.api_key = Some(String::new());

        let err = AuthFacade::initialize(options, backend.clone()).unwrap_err();

        assert_eq!(err, AuthError::App(AppError::MissingOption { field: "apiKey" }));
        assert!(backend.anonymous_calls().is_empty());
        assert!(backend.popup_calls().is_empty());
    }
}
