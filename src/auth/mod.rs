//! Authentication client handle and sign-in entry points.
//!
//! [`Auth`] binds an initialized [`crate::app::FirebaseApp`] to an
//! [`AuthBackend`]. [`sign_in_anonymously`] and [`sign_in_with_popup`] forward
//! to that backend and return its outcome unchanged. [`AuthFacade`] bundles the
//! handle with the pre-configured Google provider.
mod api;
mod backend;
mod error;
mod facade;
mod logger;
mod model;
mod oauth;
mod rest;

#[doc(inline)]
pub use api::{sign_in_anonymously, sign_in_with_popup, Auth, AuthBuilder};

#[doc(inline)]
pub use backend::AuthBackend;

#[doc(inline)]
pub use error::{AuthError, AuthResult, PopupError};

#[doc(inline)]
pub use facade::AuthFacade;

#[doc(inline)]
pub use model::{AuthCredential, User, UserCredential, UserInfo};

#[doc(inline)]
pub use oauth::{
    build_post_body, GoogleAuthProvider, OAuthPopupHandler, OAuthProvider, OAuthRequest, PkcePair,
};

#[doc(inline)]
pub use rest::{IdentityToolkitBackend, DEFAULT_IDENTITY_TOOLKIT_ENDPOINT};
