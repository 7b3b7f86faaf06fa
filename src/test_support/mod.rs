//! Test utilities shared across crate-level unit tests.

pub mod backend;
pub mod firebase;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

pub use backend::{credential_for_uid, StubBackend};
pub use firebase::{test_firebase_app_with_api_key, test_options};
#[cfg(not(target_arch = "wasm32"))]
pub use http::start_mock_server;
