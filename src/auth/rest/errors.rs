use serde::Deserialize;

use crate::auth::error::AuthError;

const INTERNAL_ERROR: &str = "auth/internal-error";

/// Server error codes and the `auth/...` codes the web SDK reports for them.
const SERVER_ERROR_MAP: &[(&str, &str)] = &[
    ("OPERATION_NOT_ALLOWED", "auth/operation-not-allowed"),
    ("ADMIN_ONLY_OPERATION", "auth/admin-restricted-operation"),
    ("FEDERATED_USER_ID_ALREADY_LINKED", "auth/credential-already-in-use"),
    ("EMAIL_EXISTS", "auth/email-already-in-use"),
    ("NEED_CONFIRMATION", "auth/account-exists-with-different-credential"),
    ("TOO_MANY_ATTEMPTS_TRY_LATER", "auth/too-many-requests"),
    ("QUOTA_EXCEEDED", "auth/quota-exceeded"),
    ("INVALID_IDP_RESPONSE", "auth/invalid-credential"),
    ("INVALID_PENDING_TOKEN", "auth/invalid-credential"),
    ("USER_DISABLED", "auth/user-disabled"),
    ("API_KEY_INVALID", "auth/invalid-api-key"),
    ("INVALID_API_KEY", "auth/invalid-api-key"),
];

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn map_server_code(server_code: &str) -> &'static str {
    SERVER_ERROR_MAP
        .iter()
        .find(|(server, _)| *server == server_code)
        .map(|(_, code)| *code)
        .unwrap_or(INTERNAL_ERROR)
}

/// Converts a non-success response body into an [`AuthError::Backend`].
///
/// The service reports `{"error": {"message": "CODE : detail"}}`; the detail
/// part is optional.
pub(crate) fn error_from_response(status: u16, body: &str) -> AuthError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return AuthError::Backend {
            code: INTERNAL_ERROR.to_string(),
            message: format!("Unexpected response ({status}): {body}"),
        };
    };

    let raw = envelope.error.message;
    let (server_code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    AuthError::Backend {
        code: map_server_code(server_code).to_string(),
        message: detail.unwrap_or(server_code).to_string(),
    }
}
