//! Repository for product data access, keyed by `url`

use crate::error::RepositoryError;
use crate::models::Product;
use sqlx::PgPool;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, url, title, currency, current_price, original_price, \
     discount_rate, price_history, lowest_price, highest_price, average_price, \
     is_out_of_stock, image_url, created_at, updated_at";

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new ProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new tracked product
    pub async fn create(&self, product: &Product) -> Result<Product, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO products
                (id, url, title, currency, current_price, original_price,
                 discount_rate, price_history, lowest_price, highest_price,
                 average_price, is_out_of_stock, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&product.url)
            .bind(&product.title)
            .bind(&product.currency)
            .bind(product.current_price)
            .bind(product.original_price)
            .bind(product.discount_rate)
            .bind(&product.price_history)
            .bind(product.lowest_price)
            .bind(product.highest_price)
            .bind(product.average_price)
            .bind(product.is_out_of_stock)
            .bind(&product.image_url)
            .bind(product.created_at)
            .bind(product.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Find a product by UUID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Find a product by its url identity key
    pub async fn find_by_url(&self, url: &str) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {} FROM products WHERE url = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Find all tracked products, oldest first
    pub async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY created_at ASC",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Replace a product row with its updated snapshot, keyed by url,
    /// returning the updated row
    pub async fn find_one_and_update(&self, product: &Product) -> Result<Product, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE products
            SET title = $2,
                currency = $3,
                current_price = $4,
                original_price = $5,
                discount_rate = $6,
                price_history = $7,
                lowest_price = $8,
                highest_price = $9,
                average_price = $10,
                is_out_of_stock = $11,
                image_url = $12,
                updated_at = $13
            WHERE url = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.url)
            .bind(&product.title)
            .bind(&product.currency)
            .bind(product.current_price)
            .bind(product.original_price)
            .bind(product.discount_rate)
            .bind(&product.price_history)
            .bind(product.lowest_price)
            .bind(product.highest_price)
            .bind(product.average_price)
            .bind(product.is_out_of_stock)
            .bind(&product.image_url)
            .bind(product.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Get tracked product count
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
