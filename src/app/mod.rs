//! App configuration and the client application handle.
//!
//! Options come from the caller or from the environment
//! ([`FirebaseOptions::from_env`]) and are validated once, when the app is
//! initialized. An [`AppRegistry`] keeps one handle per app name.
mod api;
mod constants;
mod environment;
mod errors;
mod logger;
mod registry;
mod types;

#[doc(inline)]
pub use api::{initialize_app, on_log, set_log_level, SDK_VERSION};

#[doc(inline)]
pub use constants::DEFAULT_ENTRY_NAME;

#[doc(inline)]
pub use errors::{AppError, AppResult};

#[doc(inline)]
pub use logger::{LogCallback, LogLevel, LogOptions, Logger, LOGGER};

#[doc(inline)]
pub use registry::AppRegistry;

#[doc(inline)]
pub use types::{FirebaseApp, FirebaseAppSettings, FirebaseOptions};
