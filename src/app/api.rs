use crate::app::constants::DEFAULT_ENTRY_NAME;
use crate::app::errors::{AppError, AppResult};
use crate::app::logger::{self, LogCallback, LogLevel, LogOptions, LOGGER};
use crate::app::types::{FirebaseApp, FirebaseAppSettings, FirebaseOptions};

pub static SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) fn normalize_name(settings: &FirebaseAppSettings) -> AppResult<String> {
    let name = settings
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_ENTRY_NAME.to_string());
    if name.trim().is_empty() {
        return Err(AppError::BadAppName { app_name: name });
    }
    Ok(name)
}

/// Validates `options` and creates a standalone app handle.
///
/// Fails with [`AppError::MissingOption`] before any I/O when a required option
/// is absent. Use [`crate::app::AppRegistry`] when the same handle must be
/// reused across initializations.
pub fn initialize_app(
    options: FirebaseOptions,
    settings: Option<FirebaseAppSettings>,
) -> AppResult<FirebaseApp> {
    let settings = settings.unwrap_or_default();
    let name = normalize_name(&settings)?;
    if let Err(err) = options.validate() {
        LOGGER.error(format!("Refusing to initialize app '{name}': {err}"));
        return Err(err);
    }
    LOGGER.debug(format!(
        "Initialized app '{name}' for project {}",
        options.project_id.as_deref().unwrap_or_default()
    ));
    Ok(FirebaseApp::new(name, options))
}

pub fn on_log(callback: Option<LogCallback>, options: Option<LogOptions>) {
    logger::set_user_log_handler(callback, options);
}

pub fn set_log_level(level: LogLevel) {
    let _ = logger::set_log_level(level);
}
