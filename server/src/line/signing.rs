//! LINE Webhook Signature Verification
//!
//! LINE signs each webhook body with HMAC-SHA256 keyed by the channel secret
//! and sends the base64 digest in `X-Line-Signature`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Sign a payload with HMAC-SHA256 and return the base64-encoded signature.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a base64 HMAC-SHA256 signature against a payload.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Ok(provided) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    // Constant-time comparison
    mac.verify_slice(&provided).is_ok()
}
