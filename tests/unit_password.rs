use instructor_led::instructor_core::password::{
    hash_password, hash_password_with_cost, verify_password,
};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password_with_cost(password, 4).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_hash_password_default_cost() {
    let hash = hash_password("testpassword123").unwrap();
    assert!(verify_password("testpassword123", &hash));
}

#[test]
fn test_hash_password_empty() {
    let hash = hash_password_with_cost("", 4).unwrap();
    assert!(verify_password("", &hash));
    assert!(!verify_password(" ", &hash));
}

#[test]
fn test_verify_password_correct() {
    let password = "correctpassword";
    let hash = hash_password_with_cost(password, 4).unwrap();

    assert!(verify_password(password, &hash));
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password_with_cost("correctpassword", 4).unwrap();

    assert!(!verify_password("wrongpassword", &hash));
    assert!(!verify_password("Correctpassword", &hash));
}

#[test]
fn test_same_password_different_hashes() {
    let password = "samepassword";
    let hash1 = hash_password_with_cost(password, 4).unwrap();
    let hash2 = hash_password_with_cost(password, 4).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1));
    assert!(verify_password(password, &hash2));
}

#[test]
fn test_verify_password_malformed_digest() {
    assert!(!verify_password("password", "plaintext-not-a-hash"));
    assert!(!verify_password("password", "$2b$04$short"));
}

#[test]
fn test_hash_password_invalid_cost() {
    let err = hash_password_with_cost("password", 2).unwrap_err();
    assert_eq!(err.status.as_u16(), 500);
}

#[test]
fn test_passwords_sharing_72_byte_prefix_are_distinct() {
    let prefix = "a".repeat(72);
    let digest = hash_password_with_cost(&prefix, 4).unwrap();

    assert!(verify_password(&prefix, &digest));
    assert!(!verify_password(&format!("{prefix}WRONG"), &digest));
    assert!(!verify_password(&format!("{prefix}correct"), &digest));
}

#[test]
fn test_hash_password_too_long() {
    let err = hash_password_with_cost(&format!("{}correct", "a".repeat(72)), 4).unwrap_err();
    assert_eq!(err.status.as_u16(), 422);
}
