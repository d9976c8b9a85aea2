use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Import a `{ "products": [...] }` feed, overwriting existing ids
    Import {
        /// Path to the JSON feed
        file: PathBuf,
    },
    /// List all products ordered by ID
    List,
    /// Get a product by ID
    Get { id: i64 },
}
