pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::favorite_item::FavoriteItem;
pub use models::identity::Identity;
pub use models::product::{Product, ProductArray};
pub use models::profile_record::ProfileRecord;
pub use models::provider_kind::{ProviderKind, known_providers};

pub use error_location::ErrorLocation;
