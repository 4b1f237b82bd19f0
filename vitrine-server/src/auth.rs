//! HTTP Basic authentication for the admin surface.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::AppState;

/// Middleware guarding the admin routes. Missing or wrong credentials
/// produce a 401 with a Basic challenge.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(basic_credentials)
        .is_some_and(|(username, password)| {
            digest_eq(&username, &state.config.admin_username)
                && digest_eq(&password, &state.config.admin_password)
        });

    if authorized {
        next.run(request).await
    } else {
        challenge()
    }
}

/// Parse `Basic <base64(user:pass)>` into its parts.
fn basic_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Compare via fixed-width digests so the comparison does not leak length.
fn digest_eq(given: &str, expected: &str) -> bool {
    Sha256::digest(given.as_bytes()) == Sha256::digest(expected.as_bytes())
}

fn challenge() -> Response {
    (
        [(
            header::WWW_AUTHENTICATE,
            "Basic realm=\"vitrine-admin\", charset=\"UTF-8\"",
        )],
        crate::AppError::unauthorized("admin credentials required"),
    )
        .into_response()
}
