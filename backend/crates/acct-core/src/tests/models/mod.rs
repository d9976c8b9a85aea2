mod identity;
mod product;
mod profile_record;
mod provider_kind;
