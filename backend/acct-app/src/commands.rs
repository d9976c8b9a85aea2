use crate::{product_commands::ProductCommands, profile_commands::ProfileCommands};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Anonymous sign-in, profile creation, then Google and Apple linking
    Demo,

    /// Stored profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Product catalog operations
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },
}
