use crate::app::{initialize_app, FirebaseApp, FirebaseOptions};

/// Complete options for a `test` project using the given API key.
pub fn test_options(api_key: impl Into<String>) -> FirebaseOptions {
    FirebaseOptions {
        api_key: Some(api_key.into()),
        auth_domain: Some("test.firebaseapp.com".into()),
        project_id: Some("test".into()),
        app_id: Some("1:1234567890:web:test".into()),
        ..Default::default()
    }
}

/// Build a standalone app with the given API key for use in tests.
///
/// Each call returns a new handle, so tests stay isolated from each other.
pub fn test_firebase_app_with_api_key(api_key: impl Into<String>) -> FirebaseApp {
    initialize_app(test_options(api_key), None).expect("test options are complete")
}
