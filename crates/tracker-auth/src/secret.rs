//! # Signing Secret
//!
//! The process-wide HMAC key. Loaded once at startup and handed to
//! [`TokenCodec::new`](crate::TokenCodec::new); nothing reads it from
//! global state.

use zeroize::Zeroizing;

/// Length below which a secret is accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// HMAC signing key material.
///
/// Zeroized on drop. `Debug` never prints the bytes.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl SigningSecret {
    /// Wrap raw key bytes. Returns `None` for an empty key.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return None;
        }
        if bytes.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                len = bytes.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "signing secret is shorter than recommended"
            );
        }
        Some(Self {
            bytes: Zeroizing::new(bytes),
        })
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty secrets cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_rejected() {
        assert!(SigningSecret::new(Vec::new()).is_none());
        assert!(SigningSecret::new("").is_none());
    }

    #[test]
    fn debug_redacts_bytes() {
        let secret = SigningSecret::new("super-secret-signing-key").unwrap();
        let printed = format!("{secret:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("REDACTED"));
        assert!(printed.contains("24"));
    }

    #[test]
    fn exposes_exact_bytes() {
        let secret = SigningSecret::new(vec![1u8, 2, 3]).unwrap();
        assert_eq!(secret.expose(), &[1, 2, 3]);
        assert_eq!(secret.len(), 3);
    }
}
