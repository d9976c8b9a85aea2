use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show a profile
    Show {
        /// User ID
        user_id: String,
    },
    /// Set or clear the premium flag
    SetPremium {
        user_id: String,
        #[arg(action = clap::ArgAction::Set)]
        is_premium: bool,
    },
    /// Add a preference (no-op if present)
    AddPreference { user_id: String, value: String },
    /// Remove a preference (no-op if absent)
    RemovePreference { user_id: String, value: String },
    /// Replace the favorite item
    SetFavorite {
        user_id: String,
        /// Item ID
        #[arg(long)]
        id: String,
        /// Item title
        #[arg(long)]
        title: String,
        /// Mark the item as popular
        #[arg(long)]
        popular: bool,
    },
    /// Remove the favorite item
    ClearFavorite { user_id: String },
    /// Delete a profile and its preferences
    Delete { user_id: String },
}
