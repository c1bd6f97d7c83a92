//! Payload integrity verification.
//!
//! Layouts 28 and 29 store a SHA-1 of each entry's payload after the fixed
//! header fields. A mismatch is always fatal: at this layer a corrupt
//! payload and one written by a different producer look the same, so the
//! payload is never trusted.

use appinfo_core::{DecodeError, Result, DIGEST_LEN};
use sha1::{Digest, Sha1};
use tracing::warn;

/// Compute the SHA-1 of a byte range.
pub fn sha1_digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Verify `payload` against the digest stored for `appid`.
pub fn verify_payload(appid: u32, payload: &[u8], expected: &[u8; DIGEST_LEN]) -> Result<()> {
    let computed = sha1_digest(payload);
    if &computed != expected {
        let err = DecodeError::IntegrityMismatch {
            appid,
            expected: *expected,
            computed,
        };
        warn!(appid, len = payload.len(), error = %err, "Payload digest mismatch");
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_vectors() {
        assert_eq!(
            sha1_digest(b""),
            [
                0xda, 0x39, 0xa3, 0xee, 0x5e, 0x6b, 0x4b, 0x0d, 0x32, 0x55, 0xbf, 0xef, 0x95,
                0x60, 0x18, 0x90, 0xaf, 0xd8, 0x07, 0x09
            ]
        );
        assert_eq!(
            sha1_digest(b"abc"),
            [
                0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78,
                0x50, 0xc2, 0x6c, 0x9c, 0xd0, 0xd8, 0x9d
            ]
        );
    }

    #[test]
    fn test_verify_ok() {
        let payload = b"\x00appinfo\x00\x08\x08";
        let digest = sha1_digest(payload);
        assert!(verify_payload(440, payload, &digest).is_ok());
    }

    #[test]
    fn test_verify_detects_bit_flip() {
        let mut payload = b"\x01name\x00tf\x00\x08".to_vec();
        let digest = sha1_digest(&payload);
        payload[2] ^= 0x01;

        match verify_payload(440, &payload, &digest) {
            Err(DecodeError::IntegrityMismatch {
                appid,
                expected,
                computed,
            }) => {
                assert_eq!(appid, 440);
                assert_eq!(expected, digest);
                assert_ne!(computed, digest);
            }
            other => panic!("expected IntegrityMismatch, got {:?}", other),
        }
    }
}
