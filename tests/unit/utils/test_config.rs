use resale_desk::utils::config::{get_env_or_default, get_env_or_none};
use std::env;

#[test]
fn default_used_when_var_missing() {
    env::remove_var("RESALE_TEST_MISSING");
    let value: u32 = get_env_or_default("RESALE_TEST_MISSING", 42);
    assert_eq!(value, 42);
}

#[test]
fn parses_present_var() {
    env::set_var("RESALE_TEST_PRESENT", "7");
    let value: u32 = get_env_or_default("RESALE_TEST_PRESENT", 42);
    assert_eq!(value, 7);
    env::remove_var("RESALE_TEST_PRESENT");
}

#[test]
fn default_used_when_var_unparseable() {
    env::set_var("RESALE_TEST_BAD", "not-a-number");
    let value: u64 = get_env_or_default("RESALE_TEST_BAD", 5);
    assert_eq!(value, 5);
    env::remove_var("RESALE_TEST_BAD");
}

#[test]
fn none_when_var_missing() {
    env::remove_var("RESALE_TEST_NONE");
    let value: Option<u32> = get_env_or_none("RESALE_TEST_NONE");
    assert_eq!(value, None);
}

#[test]
fn some_when_var_present() {
    env::set_var("RESALE_TEST_SOME", "123");
    let value: Option<u32> = get_env_or_none("RESALE_TEST_SOME");
    assert_eq!(value, Some(123));
    env::remove_var("RESALE_TEST_SOME");
}
