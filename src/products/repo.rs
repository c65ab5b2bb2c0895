use sqlx::SqlitePool;
use uuid::Uuid;

use super::{dto::ListParams, repo_types::Product};
use crate::error::AppError;

#[derive(Clone)]
pub struct ProductRepo {
    db: SqlitePool,
}

impl ProductRepo {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, created_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| not_found(id))
    }

    pub async fn find_all(&self, params: ListParams) -> Result<Vec<Product>, AppError> {
        // Column and direction come from closed enums, never from raw input.
        let mut sql = format!(
            "SELECT id, name, price, created_at FROM products ORDER BY {} {}, id",
            params.sort_by.column(),
            params.order.keyword()
        );
        if params.window.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut query = sqlx::query_as::<_, Product>(&sql);
        if let Some((limit, offset)) = params.window {
            query = query.bind(limit).bind(offset);
        }
        let rows = query.fetch_all(&self.db).await?;
        Ok(rows)
    }

    pub async fn update(&self, product: &Product) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, price = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.id)
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(product.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("product {id} not found"))
}
