use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::parse_decimal;
use crate::domain::invoicing::{
  TaxRate, VatRate, errors::InvoiceError, ports::TaxRateRepository,
};

#[derive(Debug, FromRow)]
struct TaxRateRow {
  id: Uuid,
  category_id: Uuid,
  rate: String,
  valid_from: NaiveDate,
  valid_until: Option<NaiveDate>,
}

impl TryFrom<TaxRateRow> for TaxRate {
  type Error = InvoiceError;

  fn try_from(row: TaxRateRow) -> Result<Self, Self::Error> {
    let rate = VatRate::new(parse_decimal(&row.rate, "rate")?)?;

    Ok(TaxRate {
      id: row.id,
      category_id: row.category_id,
      rate,
      valid_from: row.valid_from,
      valid_until: row.valid_until,
    })
  }
}

pub struct SqliteTaxRateRepository {
  pool: SqlitePool,
}

impl SqliteTaxRateRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TaxRateRepository for SqliteTaxRateRepository {
  async fn insert(&self, rate: TaxRate) -> Result<TaxRate, InvoiceError> {
    let row = sqlx::query_as::<_, TaxRateRow>(
      r#"
            INSERT INTO tax_rates (id, category_id, rate, valid_from, valid_until)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, category_id, rate, valid_from, valid_until
            "#,
    )
    .bind(rate.id)
    .bind(rate.category_id)
    .bind(rate.rate.value().to_string())
    .bind(rate.valid_from)
    .bind(rate.valid_until)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_effective_for_category(
    &self,
    category_id: Uuid,
    on_date: NaiveDate,
  ) -> Result<Option<TaxRate>, InvoiceError> {
    // Intervals per category are assumed non-overlapping; if they do
    // overlap, the most recently started one wins
    let row = sqlx::query_as::<_, TaxRateRow>(
      r#"
            SELECT id, category_id, rate, valid_from, valid_until
            FROM tax_rates
            WHERE category_id = ?
              AND valid_from <= ?
              AND (valid_until IS NULL OR valid_until >= ?)
            ORDER BY valid_from DESC
            LIMIT 1
            "#,
    )
    .bind(category_id)
    .bind(on_date)
    .bind(on_date)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list_effective_on(&self, on_date: NaiveDate) -> Result<Vec<TaxRate>, InvoiceError> {
    let rows = sqlx::query_as::<_, TaxRateRow>(
      r#"
            SELECT id, category_id, rate, valid_from, valid_until
            FROM tax_rates
            WHERE valid_from <= ?
              AND (valid_until IS NULL OR valid_until >= ?)
            ORDER BY valid_from ASC
            "#,
    )
    .bind(on_date)
    .bind(on_date)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
