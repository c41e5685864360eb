//! Transport-level credential extraction
//!
//! The credential rides in the `access_token` cookie of the WebSocket
//! handshake. Browsers that stored the cookie as `Bearer <token>` may deliver
//! the prefix verbatim or URL-encoded, so both forms are stripped before
//! verification.

/// Pull the `access_token` value out of a raw `Cookie` header.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name.trim() == "access_token" {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Strip an optional `Bearer ` / `Bearer%20` prefix, case-insensitively.
pub fn strip_bearer(raw: &str) -> &str {
    let token = raw.trim();
    let lower = token.to_ascii_lowercase();
    if lower.starts_with("bearer ") {
        token[7..].trim()
    } else if lower.starts_with("bearer%20") {
        token[9..].trim()
    } else {
        token
    }
}
