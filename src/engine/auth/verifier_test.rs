use super::types::AuthError;
use super::verifier::ApiKeyVerifier;
use crate::logging::init_for_tests;

// sha256("secret")
const SECRET_HASH: &str = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b";

#[test]
fn accepts_the_key_behind_the_hash() {
    init_for_tests();
    let verifier = ApiKeyVerifier::from_hex(SECRET_HASH).unwrap();
    assert_eq!(verifier.verify(Some("secret")), Ok(()));
}

#[test]
fn configured_hash_is_case_insensitive() {
    let verifier = ApiKeyVerifier::from_hex(&SECRET_HASH.to_uppercase()).unwrap();
    assert_eq!(verifier.verify(Some("secret")), Ok(()));
}

#[test]
fn rejects_missing_and_wrong_keys() {
    init_for_tests();
    let verifier = ApiKeyVerifier::from_hex(SECRET_HASH).unwrap();
    assert_eq!(verifier.verify(None), Err(AuthError::MissingKey));
    assert_eq!(verifier.verify(Some("Secret")), Err(AuthError::InvalidKey));
    assert_eq!(verifier.verify(Some("")), Err(AuthError::InvalidKey));
}

#[test]
fn the_hash_itself_is_not_a_key() {
    let verifier = ApiKeyVerifier::from_hex(SECRET_HASH).unwrap();
    assert_eq!(verifier.verify(Some(SECRET_HASH)), Err(AuthError::InvalidKey));
}

#[test]
fn malformed_configured_hash_is_rejected() {
    for hash in ["", "zz", "2bb80d537b1da3e3"] {
        assert_eq!(
            ApiKeyVerifier::from_hex(hash).unwrap_err(),
            AuthError::InvalidConfiguredHash
        );
    }
}

#[test]
fn verifier_for_a_plain_key() {
    let verifier = ApiKeyVerifier::for_key("secret");
    assert_eq!(verifier.verify(Some("secret")), Ok(()));
}
