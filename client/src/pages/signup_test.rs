use super::*;

const GOOD_PASSWORD: &str = "Tr0ub4dor&3";

#[test]
fn validate_signup_input_trims_name_and_email() {
    let request = validate_signup_input("  ada_l  ", " ada@example.com ", GOOD_PASSWORD).expect("valid");
    assert_eq!(request.name, "ada_l");
    assert_eq!(request.email, "ada@example.com");
    assert_eq!(request.password, GOOD_PASSWORD);
}

#[test]
fn validate_signup_input_requires_every_field() {
    assert_eq!(validate_signup_input("", "a@b.com", GOOD_PASSWORD), Err("Enter a name, email, and password."));
    assert_eq!(validate_signup_input("ada", "  ", GOOD_PASSWORD), Err("Enter a name, email, and password."));
    assert_eq!(validate_signup_input("ada", "a@b.com", "   "), Err("Enter a name, email, and password."));
}

// =============================================================
// Field rules
// =============================================================

#[test]
fn validate_name_allows_word_characters_up_to_fifteen() {
    assert_eq!(validate_name("a"), Ok(()));
    assert_eq!(validate_name("abc_DEF_123_xyz"), Ok(()));
    assert!(validate_name("abc_DEF_123_xyz0").is_err());
    assert!(validate_name("has space").is_err());
    assert!(validate_name("dash-name").is_err());
    assert!(validate_name("ünï").is_err());
}

#[test]
fn validate_email_checks_shape() {
    assert_eq!(validate_email("a@b.com"), Ok(()));
    assert_eq!(validate_email("first.last+tag@mail-host.example"), Ok(()));
    assert!(validate_email("no-at-sign").is_err());
    assert!(validate_email("@b.com").is_err());
    assert!(validate_email("a@").is_err());
    assert!(validate_email("a@-b.com").is_err());
    assert!(validate_email("a b@c.com").is_err());
}

#[test]
fn validate_email_rejects_overlong_addresses() {
    let local = "a".repeat(250);
    assert!(validate_email(&format!("{local}@b.com")).is_err());
}

#[test]
fn validate_password_needs_all_character_classes() {
    assert_eq!(validate_password(GOOD_PASSWORD), Ok(()));
    assert_eq!(validate_password("With Space 1!"), Ok(()));
    assert!(validate_password("Sh0rt!").is_err());
    assert!(validate_password("alllower1!").is_err());
    assert!(validate_password("ALLUPPER1!").is_err());
    assert!(validate_password("NoDigits!!").is_err());
    assert!(validate_password("NoSymbol11").is_err());
}
