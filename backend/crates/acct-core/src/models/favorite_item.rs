use serde::{Deserialize, Serialize};

/// The single favorite entry a profile may hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    pub title: String,
    pub is_popular: bool,
}

impl FavoriteItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_popular: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_popular,
        }
    }
}
