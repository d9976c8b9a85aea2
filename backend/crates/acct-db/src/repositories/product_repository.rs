use crate::{DbError, Result as DbErrorResult};

use acct_core::{Product, ProductArray};

use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    discount_percentage: Option<f64>,
    rating: Option<f64>,
    stock: Option<i64>,
    brand: Option<String>,
    category: Option<String>,
    thumbnail: Option<String>,
    images: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(r: ProductRow) -> DbErrorResult<Self> {
        Ok(Product {
            id: r.id,
            title: r.title,
            description: r.description,
            price: r.price,
            discount_percentage: r.discount_percentage,
            rating: r.rating,
            stock: r.stock,
            brand: r.brand,
            category: r.category,
            thumbnail: r.thumbnail,
            images: serde_json::from_str(&r.images)?,
        })
    }
}

const UPSERT_SQL: &str = r#"
  INSERT INTO products (
      id, title, description, price, discount_percentage,
      rating, stock, brand, category, thumbnail, images
  ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
  ON CONFLICT(id) DO UPDATE SET
      title = excluded.title,
      description = excluded.description,
      price = excluded.price,
      discount_percentage = excluded.discount_percentage,
      rating = excluded.rating,
      stock = excluded.stock,
      brand = excluded.brand,
      category = excluded.category,
      thumbnail = excluded.thumbnail,
      images = excluded.images
"#;

const SELECT_SQL: &str = r#"
  SELECT id, title, description, price, discount_percentage,
         rating, stock, brand, category, thumbnail, images
  FROM products
"#;

/// Catalog documents keyed by product id.
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write `product` in full; an existing document is replaced, not merged.
    pub async fn upsert(&self, product: &Product) -> DbErrorResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::upsert_with(&mut conn, product).await
    }

    /// Upload every product of a feed in one transaction.
    ///
    /// Returns the number of products written.
    pub async fn import(&self, feed: &ProductArray) -> DbErrorResult<usize> {
        let mut tx = self.pool.begin().await?;
        for product in &feed.products {
            Self::upsert_with(&mut tx, product).await?;
        }
        tx.commit().await?;

        log::info!("Imported {} products", feed.products.len());
        Ok(feed.products.len())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_SQL} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Like [`Self::find_by_id`], but a missing product is an error.
    pub async fn get(&self, id: i64) -> DbErrorResult<Product> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id.to_string()))
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_SQL} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn upsert_with(
        conn: &mut sqlx::SqliteConnection,
        product: &Product,
    ) -> DbErrorResult<()> {
        let images = serde_json::to_string(&product.images)?;

        sqlx::query(UPSERT_SQL)
            .bind(product.id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.discount_percentage)
            .bind(product.rating)
            .bind(product.stock)
            .bind(&product.brand)
            .bind(&product.category)
            .bind(&product.thumbnail)
            .bind(images)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
