//! Opaque credential keys.
//!
//! A key is 20 random bytes rendered as 40 lowercase hex characters. Clients
//! send it as `Authorization: Token <key>`; `Bearer <key>` is accepted too.

use rand::RngCore;

/// Length of a rendered key.
pub const KEY_LENGTH: usize = 40;

pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_LENGTH / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Extracts the key from an `Authorization` header value.
///
/// Returns `None` when the scheme is unknown or the key is not a well-formed
/// 40-character hex string.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let key = key.trim();
    let well_formed = key.len() == KEY_LENGTH && key.bytes().all(|b| b.is_ascii_hexdigit());
    well_formed.then_some(key)
}
