use rand::Rng;

use super::session::SessionStorage;
use crate::errors::AppError;

const TOKEN_KEY: &str = "csrf_token";

/// Token for the current visitor, minted on first use.
pub fn get_or_create_token<S: SessionStorage>(storage: &S) -> String {
    if let Some(token) = storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
        return token;
    }
    let token = generate_token();
    storage.set(TOKEN_KEY, &token);
    token
}

/// Reject a form whose token does not match the one in the session.
pub fn validate_csrf<S: SessionStorage>(storage: &S, submitted: &str) -> Result<(), AppError> {
    let stored = storage.get(TOKEN_KEY).unwrap_or_default();
    if stored.is_empty() || !constant_time_eq(&stored, submitted) {
        return Err(AppError::Csrf);
    }
    Ok(())
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
