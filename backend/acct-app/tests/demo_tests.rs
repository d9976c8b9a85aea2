use acct_app::run_demo;
use acct_config::AuthConfig;
use acct_core::ProviderKind;
use acct_db::{ProfileStore, in_memory_pool};

use std::collections::BTreeSet;

use googletest::prelude::*;

#[tokio::test]
async fn given_fresh_database_when_running_demo_then_user_is_linked_to_google_and_apple() {
    // Given: An empty in-memory store and default auth settings
    let pool = in_memory_pool().await.unwrap();

    // When: Running the demo
    let report = run_demo(pool.clone(), &AuthConfig::default()).await.unwrap();

    // Then: The anonymous user was upgraded in place
    assert!(report.anonymous.identity.is_anonymous());
    assert_eq!(report.linked.identity.id, report.anonymous.identity.id);
    assert_eq!(
        report.providers,
        BTreeSet::from([ProviderKind::Google, ProviderKind::Apple])
    );

    let stored = ProfileStore::new(pool)
        .get_profile(&report.anonymous.identity.id)
        .await
        .unwrap();
    assert!(!stored.is_anonymous);
    assert!(stored.has_preference("dark-mode"));
    assert_that!(stored.email, some(anything()));
    assert_eq!(stored.date_created, report.anonymous.profile.date_created);
}
