//! Form validation helpers.

use gympro::auth::validate::{
    validate_contact, validate_email, validate_name, validate_password,
    validate_password_confirmation,
};

#[test]
fn test_email_rules() {
    assert_eq!(validate_email("ravi@gympro.test"), None);
    assert_eq!(validate_email("  ").as_deref(), Some("Email is required"));
    assert_eq!(validate_email("ravi@gympro").as_deref(), Some("Invalid email address"));
    assert_eq!(validate_email("ravi kumar@gympro.test").as_deref(), Some("Invalid email address"));
}

#[test]
fn test_name_and_password_rules() {
    assert_eq!(validate_name("").as_deref(), Some("Name is required"));
    assert!(validate_name(&"x".repeat(101)).is_some());
    assert_eq!(validate_name("Ravi"), None);
    assert_eq!(validate_password("").as_deref(), Some("Password is required"));
    assert_eq!(
        validate_password_confirmation("secret1", "secret2").as_deref(),
        Some("Passwords do not match")
    );
    assert_eq!(validate_password_confirmation("secret", "secret"), None);
}

#[test]
fn test_contact_form_reports_each_field() {
    let errors = validate_contact("", "bad", " ");
    assert_eq!(errors.name.as_deref(), Some("Name is required"));
    assert_eq!(errors.email.as_deref(), Some("Invalid email address"));
    assert_eq!(errors.message.as_deref(), Some("Message is required"));

    assert!(validate_contact("Ravi", "ravi@gympro.test", "Hello").is_empty());
}
