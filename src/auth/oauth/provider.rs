use std::collections::BTreeMap;

use url::Url;

use super::pkce::PkcePair;
use super::OAuthRequest;
use crate::app::FirebaseApp;
use crate::auth::error::{AuthError, AuthResult};

/// Configured identity provider passed to popup sign-in.
///
/// Stores scopes, custom parameters and language hints, and turns them into an
/// [`OAuthRequest`] for the popup handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProvider {
    provider_id: String,
    authorization_endpoint: String,
    scopes: Vec<String>,
    custom_parameters: BTreeMap<String, String>,
    language_code: Option<String>,
    pkce_enabled: bool,
}

impl OAuthProvider {
    pub fn new(provider_id: impl Into<String>, authorization_endpoint: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            authorization_endpoint: authorization_endpoint.into(),
            scopes: Vec::new(),
            custom_parameters: BTreeMap::new(),
            language_code: None,
            pkce_enabled: false,
        }
    }

    /// Returns the provider identifier (e.g. `google.com`).
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn custom_parameters(&self) -> &BTreeMap<String, String> {
        &self.custom_parameters
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_deref()
    }

    /// Adds a scope to the provider if it has not been added yet.
    pub fn add_scope(&mut self, scope: impl Into<String>) -> &mut Self {
        let value = scope.into();
        if !self.scopes.contains(&value) {
            self.scopes.push(value);
        }
        self
    }

    /// Replaces the custom parameters included in authorization requests.
    pub fn set_custom_parameters<I, K, V>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_parameters = parameters
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self
    }

    pub fn set_custom_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.custom_parameters.insert(key.into(), value.into());
        self
    }

    pub fn set_language_code(&mut self, value: impl Into<String>) -> &mut Self {
        self.language_code = Some(value.into());
        self
    }

    pub fn enable_pkce(&mut self) -> &mut Self {
        self.pkce_enabled = true;
        self
    }

    pub fn disable_pkce(&mut self) -> &mut Self {
        self.pkce_enabled = false;
        self
    }

    pub fn pkce_enabled(&self) -> bool {
        self.pkce_enabled
    }

    /// Builds the request handed to an [`super::OAuthPopupHandler`].
    ///
    /// The URL carries the scopes, `hl`, the app's `auth_domain` and `apiKey`,
    /// every custom parameter, and a fresh S256 challenge when PKCE is enabled.
    pub fn build_request(&self, app: &FirebaseApp) -> AuthResult<OAuthRequest> {
        let mut url = Url::parse(&self.authorization_endpoint).map_err(|err| {
            AuthError::InvalidCredential(format!(
                "Invalid authorization endpoint for provider {}: {err}",
                self.provider_id
            ))
        })?;

        let pkce = self.pkce_enabled.then(PkcePair::generate);
        {
            let options = app.options();
            let mut pairs = url.query_pairs_mut();
            if !self.scopes.is_empty() {
                pairs.append_pair("scope", &self.scopes.join(" "));
            }
            if let Some(lang) = &self.language_code {
                pairs.append_pair("hl", lang);
            }
            if let Some(auth_domain) = &options.auth_domain {
                pairs.append_pair("auth_domain", auth_domain);
            }
            if let Some(api_key) = &options.api_key {
                pairs.append_pair("apiKey", api_key);
            }
            for (key, value) in &self.custom_parameters {
                pairs.append_pair(key, value);
            }
            if let Some(pair) = &pkce {
                pairs.append_pair("code_challenge", pair.code_challenge());
                pairs.append_pair("code_challenge_method", pair.method());
            }
        }

        Ok(OAuthRequest {
            provider_id: self.provider_id.clone(),
            auth_url: url.into(),
            language_code: self.language_code.clone(),
            custom_parameters: self.custom_parameters.clone(),
            pkce,
        })
    }
}
