//! Pre-configured Firebase app and authentication entry points.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use firebase_auth_facade::auth::{AuthFacade, IdentityToolkitBackend};
//!
//! let facade = AuthFacade::from_env(Arc::new(IdentityToolkitBackend::new()))?;
//! let session = facade.sign_in_anonymously().await?;
//! println!("signed in as {}", session.user.uid());
//! ```

pub mod app;
pub mod auth;
pub mod logger;

#[cfg(test)]
pub mod test_support;
