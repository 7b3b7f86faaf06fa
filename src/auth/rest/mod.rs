//! [`AuthBackend`] over the Firebase Auth (Identity Toolkit) REST API.

mod errors;
mod idp;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::app::FirebaseApp;
use crate::auth::backend::AuthBackend;
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::logger::LOGGER;
use crate::auth::model::{SignUpRequest, SignUpResponse, User, UserCredential, UserInfo};
use crate::auth::oauth::{build_post_body, OAuthPopupHandler, OAuthProvider};
use idp::{SignInWithIdpRequest, SignInWithIdpResponse};

pub(crate) use errors::error_from_response;

pub const DEFAULT_IDENTITY_TOOLKIT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_OAUTH_REQUEST_URI: &str = "http://localhost";
const ANONYMOUS_PROVIDER_ID: &str = "anonymous";
const OPERATION_SIGN_IN: &str = "signIn";

/// Sign-in over HTTPS against `identitytoolkit.googleapis.com`.
///
/// Anonymous sign-in calls `accounts:signUp`. Popup sign-in runs the
/// registered [`OAuthPopupHandler`] and exchanges the returned credential
/// through `accounts:signInWithIdp`.
#[derive(Clone)]
pub struct IdentityToolkitBackend {
    client: Client,
    endpoint: String,
    request_uri: String,
    popup_handler: Option<Arc<dyn OAuthPopupHandler>>,
}

impl Default for IdentityToolkitBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityToolkitBackend {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_IDENTITY_TOOLKIT_ENDPOINT.to_string(),
            request_uri: DEFAULT_OAUTH_REQUEST_URI.to_string(),
            popup_handler: None,
        }
    }

    /// Overrides the REST base URL (emulator or test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_popup_handler(mut self, handler: Arc<dyn OAuthPopupHandler>) -> Self {
        self.popup_handler = Some(handler);
        self
    }

    /// URI reported to the backend as the origin of popup sign-ins.
    pub fn with_request_uri(mut self, request_uri: impl Into<String>) -> Self {
        self.request_uri = request_uri.into();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn endpoint_url(&self, path: &str, api_key: &str) -> AuthResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.endpoint.trim_end_matches('/'), path))
            .map_err(|err| AuthError::Network(err.to_string()))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    async fn execute_request<TRequest, TResponse>(
        &self,
        path: &str,
        api_key: &str,
        request: &TRequest,
    ) -> AuthResult<TResponse>
    where
        TRequest: Serialize,
        TResponse: serde::de::DeserializeOwned + 'static,
    {
        let url = self.endpoint_url(path, api_key)?;
        log::debug!("POST {}/{}", self.endpoint.trim_end_matches('/'), path);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_from_response(status.as_u16(), &body);
            LOGGER.debug(format!("{path} failed: {err}"));
            return Err(err);
        }

        response.json().await.map_err(network_error)
    }
}

/// Drops the request URL, which carries the API key.
fn network_error(err: reqwest::Error) -> AuthError {
    AuthError::Network(err.without_url().to_string())
}

fn require<'a>(value: &'a Option<String>, field: &str) -> AuthResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AuthError::InvalidCredential(format!("Missing {field}")))
}

fn parse_expires_in(value: Option<&str>) -> AuthResult<Option<Duration>> {
    value
        .map(|raw| {
            raw.parse::<u64>().map(Duration::from_secs).map_err(|err| {
                AuthError::InvalidCredential(format!("Invalid expiresIn value: {err}"))
            })
        })
        .transpose()
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthBackend for IdentityToolkitBackend {
    async fn sign_in_anonymously(&self, app: &FirebaseApp) -> AuthResult<UserCredential> {
        let api_key = app.options().required_api_key()?;
        let request = SignUpRequest {
            return_secure_token: Some(true),
            ..Default::default()
        };

        let response: SignUpResponse = self
            .execute_request("accounts:signUp", api_key, &request)
            .await?;

        let local_id = require(&response.local_id, "localId")?;
        let id_token = require(&response.id_token, "idToken")?;
        let refresh_token = require(&response.refresh_token, "refreshToken")?;
        let expires_in = parse_expires_in(response.expires_in.as_deref())?;

        let mut user = User::new(UserInfo {
            uid: local_id.to_string(),
            provider_id: ANONYMOUS_PROVIDER_ID.to_string(),
            ..Default::default()
        })
        .with_tokens(id_token, refresh_token, expires_in);
        user.set_anonymous(true);

        Ok(UserCredential {
            user: Arc::new(user),
            provider_id: Some(ANONYMOUS_PROVIDER_ID.to_string()),
            operation_type: Some(OPERATION_SIGN_IN.to_string()),
        })
    }

    async fn sign_in_with_popup(
        &self,
        app: &FirebaseApp,
        provider: &OAuthProvider,
    ) -> AuthResult<UserCredential> {
        let handler = self
            .popup_handler
            .clone()
            .ok_or(AuthError::NotImplemented("OAuth popup handler not registered"))?;
        let api_key = app.options().required_api_key()?;

        let request = provider.build_request(app)?;
        let pkce_verifier = request.pkce().map(|pair| pair.code_verifier().to_string());
        let credential = handler.open_popup(request).await?;

        let idp_request = SignInWithIdpRequest {
            post_body: build_post_body(&credential, pkce_verifier.as_deref())?,
            request_uri: self.request_uri.clone(),
            return_idp_credential: true,
            return_secure_token: true,
        };
        let response: SignInWithIdpResponse = self
            .execute_request("accounts:signInWithIdp", api_key, &idp_request)
            .await?;

        if response.need_confirmation.unwrap_or(false) {
            return Err(AuthError::Backend {
                code: errors::map_server_code("NEED_CONFIRMATION").to_string(),
                message: format!(
                    "An account already exists for {} with a different sign-in method",
                    response.email.as_deref().unwrap_or("this email")
                ),
            });
        }

        let local_id = require(&response.local_id, "localId")?;
        let id_token = require(&response.id_token, "idToken")?;
        let refresh_token = require(&response.refresh_token, "refreshToken")?;
        let expires_in = parse_expires_in(response.expires_in.as_deref())?;
        let provider_id = response
            .provider_id
            .clone()
            .unwrap_or_else(|| provider.provider_id().to_string());

        let user = User::new(UserInfo {
            uid: local_id.to_string(),
            display_name: response.display_name.clone(),
            email: response.email.clone(),
            phone_number: None,
            photo_url: response.photo_url.clone(),
            provider_id: provider_id.clone(),
        })
        .with_tokens(id_token, refresh_token, expires_in);

        Ok(UserCredential {
            user: Arc::new(user),
            provider_id: Some(provider_id),
            operation_type: Some(OPERATION_SIGN_IN.to_string()),
        })
    }
}

impl std::fmt::Debug for IdentityToolkitBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityToolkitBackend")
            .field("endpoint", &self.endpoint)
            .field("request_uri", &self.request_uri)
            .field("popup_handler", &self.popup_handler.is_some())
            .finish()
    }
}
