use resale_desk::error::AppError;
use resale_desk::transport::shopify::{sign_webhook_body, verify_webhook_signature};

const SECRET: &str = "shpss_test_secret";
const BODY: &[u8] = br#"{"id":123456,"total_price":"245.00","currency":"USD"}"#;

#[test]
fn valid_signature_verifies() {
    let signature = sign_webhook_body(SECRET, BODY);
    assert!(verify_webhook_signature(SECRET, BODY, &signature).is_ok());
}

#[test]
fn wrong_secret_rejected() {
    let signature = sign_webhook_body("some_other_secret", BODY);
    let err = verify_webhook_signature(SECRET, BODY, &signature).unwrap_err();
    assert!(matches!(err, AppError::InvalidWebhookSignature));
}

#[test]
fn tampered_body_rejected() {
    let signature = sign_webhook_body(SECRET, BODY);
    let tampered = br#"{"id":123456,"total_price":"1.00","currency":"USD"}"#;
    assert!(verify_webhook_signature(SECRET, tampered, &signature).is_err());
}

#[test]
fn malformed_signature_fails_closed() {
    assert!(verify_webhook_signature(SECRET, BODY, "%%%not-base64%%%").is_err());
    assert!(verify_webhook_signature(SECRET, BODY, "").is_err());
}

#[test]
fn truncated_signature_fails_closed() {
    let signature = sign_webhook_body(SECRET, BODY);
    let truncated = &signature[..signature.len() / 2];
    assert!(verify_webhook_signature(SECRET, BODY, truncated).is_err());
}

#[test]
fn empty_secret_fails_closed() {
    let signature = sign_webhook_body(SECRET, BODY);
    assert!(verify_webhook_signature("", BODY, &signature).is_err());
}

#[test]
fn signature_has_whitespace_tolerance() {
    let signature = sign_webhook_body(SECRET, BODY);
    let padded = format!("  {signature}  ");
    assert!(verify_webhook_signature(SECRET, BODY, &padded).is_ok());
}
