use serde_json::Value;
use url::form_urlencoded::Serializer;

use crate::auth::error::{AuthError, AuthResult};
use crate::auth::model::AuthCredential;

/// Builds the form-encoded `postBody` the `signInWithIdp` endpoint expects.
///
/// Accepts `idToken`/`oauthIdToken`, `accessToken`/`oauthAccessToken` and
/// `code` from the provider response; at least one of them must be present.
/// `pkce_verifier` is attached as `codeVerifier` unless the response already
/// carries one.
pub fn build_post_body(credential: &AuthCredential, pkce_verifier: Option<&str>) -> AuthResult<String> {
    let response = &credential.token_response;
    let field = |primary: &str, fallback: &str| {
        response
            .get(primary)
            .or_else(|| response.get(fallback))
            .and_then(Value::as_str)
    };

    let mut serializer = Serializer::new(String::new());
    let mut has_credential = false;

    if let Some(id_token) = field("idToken", "oauthIdToken") {
        serializer.append_pair("id_token", id_token);
        has_credential = true;
    }
    if let Some(access_token) = field("accessToken", "oauthAccessToken") {
        serializer.append_pair("access_token", access_token);
        has_credential = true;
    }
    if let Some(code) = response.get("code").and_then(Value::as_str) {
        serializer.append_pair("code", code);
        has_credential = true;
    }

    if !has_credential {
        return Err(AuthError::InvalidCredential(
            "OAuth token response missing id_token/access_token/code".into(),
        ));
    }

    if let Some(verifier) = response
        .get("codeVerifier")
        .and_then(Value::as_str)
        .or(pkce_verifier)
    {
        serializer.append_pair("codeVerifier", verifier);
    }
    if let Some(nonce) = response.get("nonce").and_then(Value::as_str) {
        serializer.append_pair("nonce", nonce);
    }

    serializer.append_pair("providerId", &credential.provider_id);
    Ok(serializer.finish())
}
