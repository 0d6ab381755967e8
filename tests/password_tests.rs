use openscholar_backend::util::password::{PasswordError, PasswordUtils, PasswordUtilsImpl};

#[test]
fn test_hash_and_verify_roundtrip() {
    let hash = PasswordUtilsImpl::hash_password("correct horse battery staple").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(PasswordUtilsImpl::verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn test_wrong_password_rejected() {
    let hash = PasswordUtilsImpl::hash_password("right-password").unwrap();
    assert!(!PasswordUtilsImpl::verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_same_password_different_salts() {
    let hash1 = PasswordUtilsImpl::hash_password("secret").unwrap();
    let hash2 = PasswordUtilsImpl::hash_password("secret").unwrap();
    assert_ne!(hash1, hash2);
}

#[test]
fn test_invalid_hash_format() {
    let err = PasswordUtilsImpl::verify_password("anything", "not-a-valid-hash").unwrap_err();
    assert!(matches!(err, PasswordError::InvalidHashFormat));
}

#[test]
fn test_verify_dummy_does_not_panic() {
    // Used on login for unknown emails; must be safe to call repeatedly
    PasswordUtilsImpl::verify_dummy("whatever");
    PasswordUtilsImpl::verify_dummy("");
}
