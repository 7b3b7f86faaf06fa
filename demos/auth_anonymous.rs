use std::sync::Arc;

use firebase_auth_facade::app::set_log_level;
use firebase_auth_facade::app::LogLevel;
use firebase_auth_facade::auth::{AuthFacade, IdentityToolkitBackend};

// Reads FIREBASE_CONFIG and/or FIREBASE_API_KEY, FIREBASE_AUTH_DOMAIN,
// FIREBASE_PROJECT_ID, FIREBASE_APP_ID from the environment.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    set_log_level(LogLevel::Debug);

    let facade = AuthFacade::from_env(Arc::new(IdentityToolkitBackend::new()))?;
    let credential = facade.sign_in_anonymously().await?;

    println!(
        "Signed in anonymously as {} (token expires in {:?})",
        credential.user.uid(),
        credential.user.expires_in()
    );
    Ok(())
}
