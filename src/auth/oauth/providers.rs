use serde_json::{json, Map, Value};

use super::provider::OAuthProvider;
use crate::auth::model::AuthCredential;

/// Factory for the pre-configured Google provider descriptor.
pub struct GoogleAuthProvider;

impl GoogleAuthProvider {
    pub const PROVIDER_ID: &'static str = "google.com";
    pub const AUTHORIZATION_ENDPOINT: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";

    /// Google provider with `profile`/`email` scopes, account chooser and PKCE.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> OAuthProvider {
        let mut provider = OAuthProvider::new(Self::PROVIDER_ID, Self::AUTHORIZATION_ENDPOINT);
        provider
            .add_scope("profile")
            .add_scope("email")
            .set_custom_parameter("prompt", "select_account")
            .enable_pkce();
        provider
    }

    /// Adds a `login_hint` custom parameter to pre-select an account.
    pub fn add_login_hint(provider: &mut OAuthProvider, hint: &str) {
        provider.set_custom_parameter("login_hint", hint);
    }

    /// Wraps tokens obtained from Google outside of a popup into a credential.
    pub fn credential(id_token: Option<&str>, access_token: Option<&str>) -> AuthCredential {
        let mut response = Map::new();
        if let Some(token) = id_token {
            response.insert("idToken".into(), json!(token));
        }
        if let Some(token) = access_token {
            response.insert("accessToken".into(), json!(token));
        }
        AuthCredential {
            provider_id: Self::PROVIDER_ID.to_string(),
            sign_in_method: Self::PROVIDER_ID.to_string(),
            token_response: Value::Object(response),
        }
    }
}
