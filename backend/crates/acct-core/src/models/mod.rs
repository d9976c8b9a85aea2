pub mod favorite_item;
pub mod identity;
pub mod product;
pub mod profile_record;
pub mod provider_kind;
