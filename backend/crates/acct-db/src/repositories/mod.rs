pub mod product_repository;
pub mod profile_repository;
