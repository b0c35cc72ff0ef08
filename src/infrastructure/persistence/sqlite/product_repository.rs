use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::parse_decimal;
use crate::domain::invoicing::{
  Designation, Product, UnitPrice, errors::InvoiceError, ports::ProductRepository,
};

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  designation: String,
  unit_price_ht: String,
  tax_category_id: Uuid,
}

impl TryFrom<ProductRow> for Product {
  type Error = InvoiceError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    let designation = Designation::new(row.designation)?;
    let unit_price_ht = UnitPrice::new(parse_decimal(&row.unit_price_ht, "unit_price_ht")?)?;

    Ok(Product {
      id: row.id,
      designation,
      unit_price_ht,
      tax_category_id: row.tax_category_id,
    })
  }
}

pub struct SqliteProductRepository {
  pool: SqlitePool,
}

impl SqliteProductRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
  async fn insert(&self, product: Product) -> Result<Product, InvoiceError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            INSERT INTO products (id, designation, unit_price_ht, tax_category_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, designation, unit_price_ht, tax_category_id
            "#,
    )
    .bind(product.id)
    .bind(product.designation.value())
    .bind(product.unit_price_ht.value().to_string())
    .bind(product.tax_category_id)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_designation(&self, designation: &str) -> Result<Option<Product>, InvoiceError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, designation, unit_price_ht, tax_category_id
            FROM products
            WHERE designation = ?
            LIMIT 1
            "#,
    )
    .bind(designation)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<Product>, InvoiceError> {
    let rows = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, designation, unit_price_ht, tax_category_id
            FROM products
            ORDER BY designation ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
