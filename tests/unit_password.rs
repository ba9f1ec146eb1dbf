use reelbase::modules::users::model::Password;

#[test]
fn test_set_then_matches_same_password() {
    let mut password = Password::default();
    password.set("validpass").unwrap();

    let result = password.matches("validpass");
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_wrong_password_is_clean_mismatch() {
    let mut password = Password::default();
    password.set("validpass").unwrap();

    // A mismatch is a negative comparison, not a failure.
    let result = password.matches("wrongpass");
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_malformed_stored_hash_is_error_not_match() {
    let password = Password::from_hash("not_a_valid_bcrypt_hash".to_string());

    let result = password.matches("anything");
    assert!(result.is_err());
}

#[test]
fn test_same_password_hashes_differently() {
    let mut first = Password::default();
    let mut second = Password::default();
    first.set("samepassword").unwrap();
    second.set("samepassword").unwrap();

    assert_ne!(first.hash(), second.hash());
    assert!(first.matches("samepassword").unwrap());
    assert!(second.matches("samepassword").unwrap());
}

#[test]
fn test_matching_is_case_sensitive() {
    let mut password = Password::default();
    password.set("Password123").unwrap();

    assert!(!password.matches("password123").unwrap());
    assert!(!password.matches("PASSWORD123").unwrap());
}

#[test]
fn test_special_and_unicode_characters() {
    for plaintext in ["p@ssw0rd!#$%^&*()", "пароль密码🔒"] {
        let mut password = Password::default();
        password.set(plaintext).unwrap();
        assert!(password.matches(plaintext).unwrap(), "{plaintext}");
    }
}

#[test]
#[should_panic(expected = "missing password hash")]
fn test_matches_without_hash_panics() {
    let password = Password::default();
    let _ = password.matches("anything");
}
