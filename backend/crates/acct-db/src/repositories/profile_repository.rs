use crate::{DbError, Result as DbErrorResult};

use acct_core::{FavoriteItem, Identity, ProfileRecord};

use std::collections::BTreeSet;

use chrono::DateTime;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct UserRow {
    user_id: String,
    is_anonymous: bool,
    email: Option<String>,
    photo_url: Option<String>,
    date_created: i64,
    is_premium: bool,
    favorite_item_id: Option<String>,
    favorite_item_title: Option<String>,
    favorite_item_is_popular: Option<bool>,
}

impl UserRow {
    fn into_record(self, preferences: BTreeSet<String>) -> DbErrorResult<ProfileRecord> {
        let date_created = DateTime::from_timestamp(self.date_created, 0).ok_or_else(|| {
            DbError::serialization(format!(
                "date_created {} out of range for {}",
                self.date_created, self.user_id
            ))
        })?;

        let favorite_item = match (self.favorite_item_id, self.favorite_item_title) {
            (Some(id), Some(title)) => Some(FavoriteItem {
                id,
                title,
                is_popular: self.favorite_item_is_popular.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(ProfileRecord {
            user_id: self.user_id,
            is_anonymous: self.is_anonymous,
            email: self.email,
            photo_url: self.photo_url,
            date_created,
            is_premium: self.is_premium,
            preferences,
            favorite_item,
        })
    }
}

/// Row-level access to `users` and `user_preferences`.
///
/// Every update touches only its own column(s); writers of different
/// fields never overwrite each other. Update methods return the number of
/// affected profile rows so callers can tell a missing profile apart.
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert `record` unless a profile already exists for its user id.
    ///
    /// Returns `true` when the row was created.
    pub async fn insert_if_absent(&self, record: &ProfileRecord) -> DbErrorResult<bool> {
        let date_created = record.date_created.timestamp();
        let (favorite_id, favorite_title, favorite_popular) = match &record.favorite_item {
            Some(item) => (
                Some(item.id.as_str()),
                Some(item.title.as_str()),
                Some(item.is_popular),
            ),
            None => (None, None, None),
        };

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
              INSERT INTO users (
                  user_id, is_anonymous, email, photo_url, date_created,
                  is_premium, favorite_item_id, favorite_item_title, favorite_item_is_popular
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(user_id) DO NOTHING
              "#,
        )
        .bind(&record.user_id)
        .bind(record.is_anonymous)
        .bind(&record.email)
        .bind(&record.photo_url)
        .bind(date_created)
        .bind(record.is_premium)
        .bind(favorite_id)
        .bind(favorite_title)
        .bind(favorite_popular)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if inserted {
            for value in &record.preferences {
                sqlx::query(
                    "INSERT INTO user_preferences (user_id, value) VALUES (?, ?) \
                     ON CONFLICT(user_id, value) DO NOTHING",
                )
                .bind(&record.user_id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_id(&self, user_id: &str) -> DbErrorResult<Option<ProfileRecord>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
              SELECT user_id, is_anonymous, email, photo_url, date_created,
                     is_premium, favorite_item_id, favorite_item_title, favorite_item_is_popular
              FROM users
              WHERE user_id = ?
              "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let preferences: Vec<String> = sqlx::query_scalar(
            "SELECT value FROM user_preferences WHERE user_id = ? ORDER BY value ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        row.into_record(preferences.into_iter().collect()).map(Some)
    }

    pub async fn exists(&self, user_id: &str) -> DbErrorResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    pub async fn update_premium(&self, user_id: &str, is_premium: bool) -> DbErrorResult<u64> {
        let result = sqlx::query("UPDATE users SET is_premium = ? WHERE user_id = ?")
            .bind(is_premium)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns `true` when the value was not present before.
    pub async fn insert_preference(&self, user_id: &str, value: &str) -> DbErrorResult<bool> {
        let result = sqlx::query(
            "INSERT INTO user_preferences (user_id, value) VALUES (?, ?) \
             ON CONFLICT(user_id, value) DO NOTHING",
        )
        .bind(user_id)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Returns `true` when the value was present.
    pub async fn delete_preference(&self, user_id: &str, value: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM user_preferences WHERE user_id = ? AND value = ?")
            .bind(user_id)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn update_favorite_item(
        &self,
        user_id: &str,
        item: Option<&FavoriteItem>,
    ) -> DbErrorResult<u64> {
        let result = sqlx::query(
            r#"
              UPDATE users
              SET favorite_item_id = ?, favorite_item_title = ?, favorite_item_is_popular = ?
              WHERE user_id = ?
              "#,
        )
        .bind(item.map(|i| i.id.as_str()))
        .bind(item.map(|i| i.title.as_str()))
        .bind(item.map(|i| i.is_popular))
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Refresh the identity mirror columns; nothing else is touched.
    pub async fn update_identity_fields(&self, identity: &Identity) -> DbErrorResult<u64> {
        let result = sqlx::query(
            "UPDATE users SET is_anonymous = ?, email = ?, photo_url = ? WHERE user_id = ?",
        )
        .bind(identity.is_anonymous())
        .bind(&identity.email)
        .bind(&identity.photo_url)
        .bind(&identity.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Preferences go with the row (ON DELETE CASCADE).
    pub async fn delete(&self, user_id: &str) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
