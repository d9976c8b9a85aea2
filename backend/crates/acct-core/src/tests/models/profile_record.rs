use crate::{Identity, ProfileRecord, ProviderKind};

use std::collections::BTreeSet;

use chrono::Timelike;
use googletest::prelude::*;

#[test]
fn given_anonymous_identity_when_record_created_then_uses_defaults() {
    let identity = Identity::anonymous("anon-7".into());

    let record = ProfileRecord::from_identity(&identity);

    assert_that!(record.user_id, eq("anon-7"));
    assert_that!(record.is_anonymous, eq(true));
    assert_that!(record.is_premium, eq(false));
    assert_that!(record.preferences.is_empty(), eq(true));
    assert_that!(record.favorite_item, none());
    assert_that!(record.date_created.nanosecond(), eq(0));
}

#[test]
fn given_password_identity_when_record_created_then_copies_email_and_photo() {
    let identity = Identity::new(
        "user-9".into(),
        Some("c@example.com".into()),
        Some("https://img.example.com/c.png".into()),
        false,
        BTreeSet::from([ProviderKind::Password]),
    );

    let record = ProfileRecord::from_identity(&identity);

    assert_that!(record.is_anonymous, eq(false));
    assert_eq!(record.email.as_deref(), Some("c@example.com"));
    assert_eq!(
        record.photo_url.as_deref(),
        Some("https://img.example.com/c.png")
    );
}
