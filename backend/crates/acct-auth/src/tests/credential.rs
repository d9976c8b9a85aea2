use crate::{AuthError, Credential, GoogleSignInTokens};

use acct_core::ProviderKind;

#[test]
fn test_credential_provider_kind() {
    assert_eq!(
        Credential::password("a@example.com", "secret1").provider_kind(),
        ProviderKind::Password
    );
    assert_eq!(
        Credential::google("id", "access").provider_kind(),
        ProviderKind::Google
    );
    assert_eq!(
        Credential::apple("id", "nonce").provider_kind(),
        ProviderKind::Apple
    );
}

#[test]
fn given_blank_password_when_ensure_complete_then_empty_input() {
    let result = Credential::password("a@example.com", "   ").ensure_complete();

    assert!(matches!(
        result,
        Err(AuthError::EmptyInput {
            field: "password",
            ..
        })
    ));
}

#[test]
fn given_missing_apple_nonce_when_ensure_complete_then_empty_input() {
    let result = Credential::apple("token", "").ensure_complete();

    assert!(matches!(
        result,
        Err(AuthError::EmptyInput {
            field: "raw_nonce",
            ..
        })
    ));
}

#[test]
fn given_credential_when_debug_formatted_then_secrets_are_hidden() {
    let output = format!("{:?}", Credential::password("a@example.com", "hunter22"));

    assert!(output.contains("a@example.com"));
    assert!(!output.contains("hunter22"));
}

#[test]
fn given_google_tokens_when_into_credential_then_keeps_both_tokens() {
    let tokens = GoogleSignInTokens {
        id_token: "id-token".into(),
        access_token: "access-token".into(),
        name: None,
        email: None,
    };

    assert_eq!(
        tokens.into_credential(),
        Credential::google("id-token", "access-token")
    );
}
