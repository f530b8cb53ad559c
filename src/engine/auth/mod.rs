mod types;
mod verifier;

pub use types::{AUTH_HEADER, AuthError, AuthResult};
pub use verifier::ApiKeyVerifier;

#[cfg(test)]
mod verifier_test;
