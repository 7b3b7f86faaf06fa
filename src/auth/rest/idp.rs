use serde::{Deserialize, Serialize};

/// Body of the `accounts:signInWithIdp` request.
#[derive(Debug, Serialize, Clone)]
pub struct SignInWithIdpRequest {
    #[serde(rename = "postBody")]
    pub post_body: String,
    #[serde(rename = "requestUri")]
    pub request_uri: String,
    #[serde(rename = "returnIdpCredential")]
    pub return_idp_credential: bool,
    #[serde(rename = "returnSecureToken")]
    pub return_secure_token: bool,
}

/// Fields of the `accounts:signInWithIdp` response used to build the session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithIdpResponse {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<String>,
    pub local_id: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub provider_id: Option<String>,
    pub need_confirmation: Option<bool>,
}
