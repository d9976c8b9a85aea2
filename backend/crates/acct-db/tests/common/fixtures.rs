use acct_core::{FavoriteItem, Identity, Product, ProviderKind};

use std::collections::BTreeSet;

pub fn anonymous_identity(id: &str) -> Identity {
    Identity::anonymous(id.to_string())
}

pub fn google_identity(id: &str, email: &str) -> Identity {
    Identity::new(
        id.to_string(),
        Some(email.to_string()),
        Some(format!("https://example.com/{id}.png")),
        false,
        BTreeSet::from([ProviderKind::Google]),
    )
}

pub fn favorite(id: &str) -> FavoriteItem {
    FavoriteItem::new(id, format!("Item {id}"), true)
}

pub fn product(id: i64, title: &str) -> Product {
    Product {
        title: Some(title.to_string()),
        price: Some(549.0),
        discount_percentage: Some(12.96),
        rating: Some(4.69),
        stock: Some(94),
        brand: Some("Apple".to_string()),
        category: Some("smartphones".to_string()),
        images: vec![
            format!("https://cdn.example.com/{id}/1.jpg"),
            format!("https://cdn.example.com/{id}/2.jpg"),
        ],
        ..Product::new(id)
    }
}
