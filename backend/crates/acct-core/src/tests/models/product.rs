use crate::ProductArray;

use googletest::prelude::*;

#[test]
fn given_catalog_feed_when_deserialized_then_maps_camel_case_fields() {
    let json = r#"{
        "products": [
            {
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "price": 9.99,
                "discountPercentage": 7.17,
                "rating": 4.94,
                "stock": 5,
                "brand": "Essence",
                "category": "beauty",
                "thumbnail": "https://cdn.example.com/1/thumbnail.png",
                "images": ["https://cdn.example.com/1/1.png"],
                "tags": ["beauty", "mascara"]
            },
            { "id": 2 }
        ],
        "total": 194,
        "skip": 0,
        "limit": 2
    }"#;

    let feed: ProductArray = serde_json::from_str(json).unwrap();

    assert_that!(feed.products.len(), eq(2));
    assert_that!(feed.products[0].discount_percentage, some(eq(7.17)));
    assert_that!(feed.products[0].images.len(), eq(1));
    assert_that!(feed.products[1].title, none());
    assert_that!(feed.products[1].images.is_empty(), eq(true));
    assert_that!(feed.total, some(eq(194)));
}
