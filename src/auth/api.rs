use std::sync::{Arc, Mutex, MutexGuard};

use crate::app::FirebaseApp;
use crate::auth::backend::AuthBackend;
use crate::auth::error::AuthResult;
use crate::auth::logger::LOGGER;
use crate::auth::model::{User, UserCredential};
use crate::auth::oauth::OAuthProvider;
use crate::auth::rest::IdentityToolkitBackend;

/// Client handle for authentication, bound to one app and one backend.
///
/// Sign-in calls go straight to the backend; whatever it returns, success or
/// error, is handed back unchanged.
pub struct Auth {
    app: FirebaseApp,
    backend: Arc<dyn AuthBackend>,
    current_user: Mutex<Option<Arc<User>>>,
}

impl Auth {
    pub fn builder(app: FirebaseApp) -> AuthBuilder {
        AuthBuilder::new(app)
    }

    /// Builds a handle backed by [`IdentityToolkitBackend`] with default settings.
    pub fn new(app: FirebaseApp) -> AuthResult<Arc<Self>> {
        Self::builder(app).build()
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    pub fn backend(&self) -> Arc<dyn AuthBackend> {
        Arc::clone(&self.backend)
    }

    /// User of the last successful sign-in through this handle.
    pub fn current_user(&self) -> Option<Arc<User>> {
        self.current_user_guard().clone()
    }

    /// Forgets the current user locally. Nothing is sent to the backend.
    pub fn sign_out(&self) {
        if self.current_user_guard().take().is_some() {
            LOGGER.debug(format!("Signed out of app '{}'", self.app.name()));
        }
    }

    /// Signs in as a new anonymous user.
    ///
    /// # Examples
    /// ```rust,ignore
    /// let credential = auth.sign_in_anonymously().await?;
    /// assert!(credential.user.is_anonymous());
    /// ```
    pub async fn sign_in_anonymously(&self) -> AuthResult<UserCredential> {
        LOGGER.debug(format!("signInAnonymously for app '{}'", self.app.name()));
        let result = self.backend.sign_in_anonymously(&self.app).await;
        self.record(&result);
        result
    }

    /// Signs in through the provider's interactive popup flow.
    pub async fn sign_in_with_popup(&self, provider: &OAuthProvider) -> AuthResult<UserCredential> {
        LOGGER.debug(format!(
            "signInWithPopup({}) for app '{}'",
            provider.provider_id(),
            self.app.name()
        ));
        let result = self.backend.sign_in_with_popup(&self.app, provider).await;
        self.record(&result);
        result
    }

    fn current_user_guard(&self) -> MutexGuard<'_, Option<Arc<User>>> {
        self.current_user
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn record(&self, result: &AuthResult<UserCredential>) {
        match result {
            Ok(credential) => {
                *self.current_user_guard() = Some(Arc::clone(&credential.user));
            }
            Err(err) => LOGGER.debug(format!("Sign-in failed: {err}")),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("app", &self.app.name())
            .field("current_user", &self.current_user().map(|user| user.uid().to_owned()))
            .finish()
    }
}

/// Signs in anonymously through `auth`. See [`Auth::sign_in_anonymously`].
pub async fn sign_in_anonymously(auth: &Auth) -> AuthResult<UserCredential> {
    auth.sign_in_anonymously().await
}

/// Signs in with `provider` through `auth`. See [`Auth::sign_in_with_popup`].
pub async fn sign_in_with_popup(auth: &Auth, provider: &OAuthProvider) -> AuthResult<UserCredential> {
    auth.sign_in_with_popup(provider).await
}

pub struct AuthBuilder {
    app: FirebaseApp,
    backend: Option<Arc<dyn AuthBackend>>,
}

impl AuthBuilder {
    fn new(app: FirebaseApp) -> Self {
        Self { app, backend: None }
    }

    pub fn with_backend(mut self, backend: Arc<dyn AuthBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Fails with [`crate::app::AppError::AppDeleted`] when the app was deleted.
    pub fn build(self) -> AuthResult<Arc<Auth>> {
        self.app.check_destroyed()?;
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(IdentityToolkitBackend::new()));
        Ok(Arc::new(Auth {
            app: self.app,
            backend,
            current_user: Mutex::new(None),
        }))
    }
}
