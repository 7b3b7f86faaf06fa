use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::FirebaseApp;
use crate::auth::{AuthBackend, AuthResult, OAuthProvider, User, UserCredential, UserInfo};

/// Backend stub that records its arguments and replays scripted outcomes.
pub struct StubBackend {
    anonymous: AuthResult<UserCredential>,
    popup: AuthResult<UserCredential>,
    anonymous_calls: Mutex<Vec<FirebaseApp>>,
    popup_calls: Mutex<Vec<OAuthProvider>>,
}

impl StubBackend {
    pub fn new(
        anonymous: AuthResult<UserCredential>,
        popup: AuthResult<UserCredential>,
    ) -> Arc<Self> {
        Arc::new(Self {
            anonymous,
            popup,
            anonymous_calls: Mutex::new(Vec::new()),
            popup_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn anonymous_calls(&self) -> Vec<FirebaseApp> {
        self.anonymous_calls.lock().unwrap().clone()
    }

    pub fn popup_calls(&self) -> Vec<OAuthProvider> {
        self.popup_calls.lock().unwrap().clone()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthBackend for StubBackend {
    async fn sign_in_anonymously(&self, app: &FirebaseApp) -> AuthResult<UserCredential> {
        self.anonymous_calls.lock().unwrap().push(app.clone());
        self.anonymous.clone()
    }

    async fn sign_in_with_popup(
        &self,
        _app: &FirebaseApp,
        provider: &OAuthProvider,
    ) -> AuthResult<UserCredential> {
        self.popup_calls.lock().unwrap().push(provider.clone());
        self.popup.clone()
    }
}

/// A session carrying only the given uid.
pub fn credential_for_uid(uid: &str) -> UserCredential {
    UserCredential {
        user: Arc::new(User::new(UserInfo {
            uid: uid.to_string(),
            ..Default::default()
        })),
        provider_id: None,
        operation_type: None,
    }
}
