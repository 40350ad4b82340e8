//! OTP generation — RFC 4226 (HOTP) dynamic truncation keyed by the
//! RFC 6238 time-step counter, with SHA-1, SHA-256, and SHA-512.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::otp::types::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw HMAC-OTP (RFC 4226 §5.3)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute an HOTP code for the given raw key bytes and counter.
pub fn hotp_raw(key: &[u8], counter: u64, digits: u8, algo: Algorithm) -> String {
    let hmac_result = compute_hmac(key, &counter.to_be_bytes(), algo);
    truncate(&hmac_result, digits)
}

/// Compute HMAC(key, message) using the specified algorithm.
fn compute_hmac(key: &[u8], data: &[u8], algo: Algorithm) -> Vec<u8> {
    match algo {
        Algorithm::Sha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Dynamic truncation per RFC 4226 §5.3, zero-padded to `digits`.
fn truncate(hmac_result: &[u8], digits: u8) -> String {
    let offset = (hmac_result[hmac_result.len() - 1] & 0x0f) as usize;
    let binary = ((hmac_result[offset] as u64 & 0x7f) << 24)
        | ((hmac_result[offset + 1] as u64) << 16)
        | ((hmac_result[offset + 2] as u64) << 8)
        | (hmac_result[offset + 3] as u64);
    // Saturates for digit counts beyond the u64 range, keeping the full
    // 31-bit value; any u8 digit count is total.
    let modulus = 10u64.saturating_pow(digits as u32);
    format!("{:0>width$}", binary % modulus, width = digits as usize)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOTP (time-based, RFC 6238)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute the time-step counter for a given unix timestamp.
pub fn time_step_at(unix_seconds: u64, period: u32) -> u64 {
    unix_seconds / period as u64
}

/// Current token for a service at an explicit unix timestamp.
///
/// A service without a secret yields an empty token — the normal state of
/// a placeholder entry, not an error. A malformed base-32 secret fails
/// with `InvalidSecret`, confined to this service's generation call.
pub fn token_at(service: &Service, unix_seconds: u64) -> Result<String, AuthError> {
    let secret = service.normalised_secret();
    if secret.is_empty() {
        return Ok(String::new());
    }
    let key = decode_secret(&secret)?;
    let step = time_step_at(unix_seconds, service.otp.period);
    Ok(hotp_raw(&key, step, service.otp.digits, service.otp.algorithm))
}

/// Current token for a service at the wall clock.
pub fn token_now(service: &Service) -> Result<String, AuthError> {
    token_at(service, current_unix_time())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Utility helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decode a base-32 secret (whitespace ignored, case-insensitive).
pub fn decode_secret(b32: &str) -> Result<Vec<u8>, AuthError> {
    let cleaned: String = b32
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let padded = pad_base32(&cleaned);
    base32::decode(base32::Alphabet::Rfc4648 { padding: true }, &padded)
        .or_else(|| base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned))
        .ok_or_else(|| AuthError::new(AuthErrorKind::InvalidSecret, "invalid base-32 secret"))
}

/// Pad a base-32 string to a multiple of 8 with '='.
fn pad_base32(s: &str) -> String {
    let remainder = s.len() % 8;
    if remainder == 0 {
        s.to_string()
    } else {
        let pad_count = 8 - remainder;
        format!("{}{}", s, "=".repeat(pad_count))
    }
}

/// Current unix timestamp in whole seconds.
pub fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
