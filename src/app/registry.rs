use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::app::api::{initialize_app, normalize_name};
use crate::app::constants::DEFAULT_ENTRY_NAME;
use crate::app::errors::{AppError, AppResult};
use crate::app::logger::LOGGER;
use crate::app::types::{FirebaseApp, FirebaseAppSettings, FirebaseOptions};

/// Owns the apps initialized by an application.
///
/// Constructed once at startup and passed to whoever needs an app. A second
/// `initialize_app` with the same name and options hands back the existing
/// handle instead of building a new one.
#[derive(Default)]
pub struct AppRegistry {
    apps: Mutex<HashMap<String, FirebaseApp>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn apps_guard(&self) -> MutexGuard<'_, HashMap<String, FirebaseApp>> {
        self.apps.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    pub fn initialize_app(
        &self,
        options: FirebaseOptions,
        settings: Option<FirebaseAppSettings>,
    ) -> AppResult<FirebaseApp> {
        let settings = settings.unwrap_or_default();
        let name = normalize_name(&settings)?;

        let mut apps = self.apps_guard();
        if let Some(existing) = apps.get(&name) {
            if existing.options() == &options {
                LOGGER.debug(format!("Reusing initialized app '{name}'"));
                return Ok(existing.clone());
            }
            return Err(AppError::DuplicateApp { app_name: name });
        }

        let app = initialize_app(options, Some(settings))?;
        apps.insert(name, app.clone());
        Ok(app)
    }

    pub fn get_app(&self, name: Option<&str>) -> AppResult<FirebaseApp> {
        let lookup = name.unwrap_or(DEFAULT_ENTRY_NAME);
        self.apps_guard()
            .get(lookup)
            .cloned()
            .ok_or_else(|| AppError::NoApp {
                app_name: lookup.to_string(),
            })
    }

    pub fn get_apps(&self) -> Vec<FirebaseApp> {
        self.apps_guard().values().cloned().collect()
    }

    /// Removes the app and marks every outstanding handle as deleted.
    pub fn delete_app(&self, app: &FirebaseApp) -> AppResult<()> {
        let removed = self.apps_guard().remove(app.name());
        if removed.is_some() {
            app.set_is_deleted(true);
            LOGGER.debug(format!("Deleted app '{}'", app.name()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.apps_guard().keys().cloned().collect();
        f.debug_struct("AppRegistry").field("apps", &names).finish()
    }
}
