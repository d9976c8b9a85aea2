use crate::{Identity, ProviderKind};

use std::collections::BTreeSet;

use googletest::prelude::*;

#[test]
fn given_anonymous_identity_then_has_no_providers() {
    let identity = Identity::anonymous("anon-1".into());

    assert_that!(identity.is_anonymous(), eq(true));
    assert_that!(identity.providers().is_empty(), eq(true));
    assert_that!(identity.email, none());
}

#[test]
fn given_backend_reports_anonymous_with_providers_when_built_then_is_permanent() {
    let identity = Identity::new(
        "user-1".into(),
        Some("a@example.com".into()),
        None,
        true,
        BTreeSet::from([ProviderKind::Google]),
    );

    assert_that!(identity.is_anonymous(), eq(false));
    assert!(identity.has_provider(ProviderKind::Google));
}

#[test]
fn given_permanent_identity_when_checking_other_provider_then_false() {
    let identity = Identity::new(
        "user-2".into(),
        Some("b@example.com".into()),
        None,
        false,
        BTreeSet::from([ProviderKind::Password]),
    );

    assert!(identity.has_provider(ProviderKind::Password));
    assert!(!identity.has_provider(ProviderKind::Apple));
}

#[test]
fn given_anonymous_payload_with_providers_when_deserialized_then_is_permanent() {
    let identity: Identity = serde_json::from_str(
        r#"{"id":"user-1","is_anonymous":true,"providers":["google"]}"#,
    )
    .unwrap();

    assert_that!(identity.is_anonymous(), eq(false));
    assert!(identity.has_provider(ProviderKind::Google));
}

#[test]
fn given_serialized_identity_when_deserialized_then_equal() {
    let identity = Identity::anonymous("anon-1".into());

    let json = serde_json::to_string(&identity).unwrap();
    let restored: Identity = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, identity);
}
