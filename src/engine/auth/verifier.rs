use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::types::{AuthError, AuthResult};

/// Checks presented API keys against a stored SHA-256 digest.
#[derive(Debug, Clone)]
pub struct ApiKeyVerifier {
    expected: [u8; 32],
}

impl ApiKeyVerifier {
    /// `hash` is the hex SHA-256 of the accepted key, in either case.
    pub fn from_hex(hash: &str) -> AuthResult<Self> {
        let bytes = hex::decode(hash.trim()).map_err(|_| AuthError::InvalidConfiguredHash)?;
        let expected = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| AuthError::InvalidConfiguredHash)?;
        Ok(Self { expected })
    }

    pub fn for_key(key: &str) -> Self {
        Self {
            expected: Sha256::digest(key.as_bytes()).into(),
        }
    }

    pub fn verify(&self, presented: Option<&str>) -> AuthResult<()> {
        let Some(key) = presented else {
            warn!(target: "pilgrim_stats::auth", "Unauthorized request without API key");
            return Err(AuthError::MissingKey);
        };

        let digest = Sha256::digest(key.as_bytes());
        if bool::from(digest.as_slice().ct_eq(&self.expected)) {
            Ok(())
        } else {
            warn!(target: "pilgrim_stats::auth", "Unauthorized request with wrong API key");
            Err(AuthError::InvalidKey)
        }
    }
}
