use crate::{CoreError, ProviderKind, known_providers};

use std::collections::BTreeSet;
use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn test_provider_kind_as_str() {
    assert_eq!(ProviderKind::Password.as_str(), "password");
    assert_eq!(ProviderKind::Google.as_str(), "google.com");
    assert_eq!(ProviderKind::Apple.as_str(), "apple.com");
}

#[test]
fn test_provider_kind_from_str() {
    assert_eq!(
        ProviderKind::from_str("password").unwrap(),
        ProviderKind::Password
    );
    assert_eq!(
        ProviderKind::from_str("google.com").unwrap(),
        ProviderKind::Google
    );
    assert_eq!(
        ProviderKind::from_str("apple.com").unwrap(),
        ProviderKind::Apple
    );
}

#[test]
fn given_unknown_provider_id_when_parsed_then_returns_invalid_provider_kind() {
    let result = ProviderKind::from_str("github.com");

    assert!(matches!(
        result,
        Err(CoreError::InvalidProviderKind { ref value, .. }) if value == "github.com"
    ));
}

#[test]
fn given_mixed_provider_ids_when_filtered_then_keeps_known_subset() {
    let ids = ["password", "github.com", "google.com", "phone"];

    let providers = known_providers(ids);

    assert_eq!(
        providers,
        BTreeSet::from([ProviderKind::Password, ProviderKind::Google])
    );
}

#[test]
fn given_duplicate_provider_ids_when_filtered_then_collapses_to_one_kind() {
    let ids = vec!["apple.com".to_string(), "apple.com".to_string()];

    let providers = known_providers(&ids);

    assert_that!(providers.len(), eq(1));
    assert!(providers.contains(&ProviderKind::Apple));
}

#[test]
fn test_provider_kind_serializes_as_snake_case() {
    let json = serde_json::to_string(&ProviderKind::Google).unwrap();
    assert_eq!(json, "\"google\"");
}
