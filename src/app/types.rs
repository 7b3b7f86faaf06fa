use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use crate::app::errors::{AppError, AppResult};

/// Identifiers of a Firebase web app, as shown in the console's config snippet.
///
/// Field names deserialize from the camelCase keys of that snippet
/// (`apiKey`, `authDomain`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseOptions {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
}

impl FirebaseOptions {
    /// Checks that every option needed by the auth client is present and non-blank.
    ///
    /// Required: `apiKey`, `authDomain`, `projectId`, `appId`. The first missing
    /// field is reported.
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
            ("appId", &self.app_id),
        ];
        for (field, value) in required {
            if !is_present(value) {
                return Err(AppError::MissingOption { field });
            }
        }
        Ok(())
    }

    /// Overlays every field set in `other` on top of `self`.
    pub fn merge(mut self, other: FirebaseOptions) -> Self {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.api_key, other.api_key);
        take(&mut self.auth_domain, other.auth_domain);
        take(&mut self.project_id, other.project_id);
        take(&mut self.storage_bucket, other.storage_bucket);
        take(&mut self.messaging_sender_id, other.messaging_sender_id);
        take(&mut self.app_id, other.app_id);
        take(&mut self.measurement_id, other.measurement_id);
        self
    }

    pub(crate) fn required_api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(AppError::MissingOption { field: "apiKey" })
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FirebaseAppSettings {
    pub name: Option<String>,
}

/// Handle to an initialized app. Clones share the same underlying instance.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<FirebaseAppInner>,
}

struct FirebaseAppInner {
    name: Arc<str>,
    options: FirebaseOptions,
    is_deleted: AtomicBool,
}

impl FirebaseApp {
    pub(crate) fn new(name: impl Into<String>, options: FirebaseOptions) -> Self {
        Self {
            inner: Arc::new(FirebaseAppInner {
                name: Arc::from(name.into().into_boxed_str()),
                options,
                is_deleted: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn options(&self) -> &FirebaseOptions {
        &self.inner.options
    }

    pub fn is_deleted(&self) -> bool {
        self.inner.is_deleted.load(Ordering::SeqCst)
    }

    pub(crate) fn set_is_deleted(&self, value: bool) {
        self.inner.is_deleted.store(value, Ordering::SeqCst);
    }

    pub fn check_destroyed(&self) -> AppResult<()> {
        if self.is_deleted() {
            return Err(AppError::AppDeleted {
                app_name: self.name().to_owned(),
            });
        }
        Ok(())
    }

    /// Returns `true` when both handles refer to the same initialized app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name())
            .field("project_id", &self.inner.options.project_id)
            .field("is_deleted", &self.is_deleted())
            .finish()
    }
}
