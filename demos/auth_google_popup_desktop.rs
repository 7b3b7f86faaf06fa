use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use firebase_auth_facade::auth::{
    AuthCredential, AuthError, AuthFacade, AuthResult, IdentityToolkitBackend, OAuthPopupHandler,
    OAuthRequest, PopupError,
};
use serde_json::Value;

/// Opens the system browser and waits for the provider response to be saved
/// to the file named by `OAUTH_CREDENTIAL_PATH` (e.g. by a local redirect page).
struct SystemBrowserPopup;

#[async_trait]
impl OAuthPopupHandler for SystemBrowserPopup {
    async fn open_popup(&self, request: OAuthRequest) -> AuthResult<AuthCredential> {
        println!("Opening system browser for {}", request.provider_id);
        webbrowser::open(&request.auth_url).map_err(|_| AuthError::Popup(PopupError::Blocked))?;

        let path = std::env::var("OAUTH_CREDENTIAL_PATH")
            .map_err(|_| AuthError::Popup(PopupError::ClosedByUser))?;
        println!("Press enter once the provider response is saved to {path}");
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .map_err(|_| AuthError::Popup(PopupError::Cancelled))?;

        let payload =
            fs::read_to_string(&path).map_err(|err| AuthError::InvalidCredential(err.to_string()))?;
        let token_response: Value = serde_json::from_str(&payload)
            .map_err(|err| AuthError::InvalidCredential(err.to_string()))?;

        Ok(AuthCredential {
            provider_id: request.provider_id.clone(),
            sign_in_method: request.provider_id,
            token_response,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let backend = IdentityToolkitBackend::new()
        .with_popup_handler(Arc::new(SystemBrowserPopup))
        .with_request_uri("http://localhost");
    let facade = AuthFacade::from_env(Arc::new(backend))?;

    let credential = facade.sign_in_with_popup(None).await?;
    println!(
        "Signed in as {} <{}>",
        credential.user.uid(),
        credential.user.info().email.as_deref().unwrap_or("no email")
    );
    Ok(())
}
