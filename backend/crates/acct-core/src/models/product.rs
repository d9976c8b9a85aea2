//! Catalog product, shaped after the dummy products feed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub rating: Option<f64>,
    pub stock: Option<i64>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            description: None,
            price: None,
            discount_percentage: None,
            rating: None,
            stock: None,
            brand: None,
            category: None,
            thumbnail: None,
            images: Vec::new(),
        }
    }
}

/// Bulk feed envelope: `{ "products": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductArray {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}
