use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::parse_decimal;
use crate::domain::invoicing::{
  Designation, Invoice, InvoiceLine, InvoiceReference, InvoiceTaxTotal, InvoiceWithClient,
  PaymentTerms, Quantity, UnitPrice, VatRate, errors::InvoiceError, ports::InvoiceRepository,
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  reference: String,
  invoice_date: NaiveDate,
  due_date: NaiveDate,
  client_id: Uuid,
  total_ht: String,
  total_ttc: String,
  payment_terms: String,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let reference = InvoiceReference::new(row.reference)?;
    let payment_terms = PaymentTerms::new(row.payment_terms)?;
    let total_ht = parse_decimal(&row.total_ht, "total_ht")?;
    let total_ttc = parse_decimal(&row.total_ttc, "total_ttc")?;

    Ok(Invoice {
      id: row.id,
      reference,
      invoice_date: row.invoice_date,
      due_date: row.due_date,
      client_id: row.client_id,
      total_ht,
      total_ttc,
      payment_terms,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceLineRow {
  id: Uuid,
  invoice_id: Uuid,
  product_id: Uuid,
  designation: String,
  unit_price_ht: String,
  quantity: i64,
  vat_rate: String,
  line_order: i32,
}

impl TryFrom<InvoiceLineRow> for InvoiceLine {
  type Error = InvoiceError;

  fn try_from(row: InvoiceLineRow) -> Result<Self, Self::Error> {
    let designation = Designation::new(row.designation)?;
    let unit_price_ht = UnitPrice::new(parse_decimal(&row.unit_price_ht, "unit_price_ht")?)?;
    let quantity = Quantity::new(row.quantity)?;
    let vat_rate = VatRate::new(parse_decimal(&row.vat_rate, "vat_rate")?)?;

    Ok(InvoiceLine {
      id: row.id,
      invoice_id: row.invoice_id,
      product_id: row.product_id,
      designation,
      unit_price_ht,
      quantity,
      vat_rate,
      line_order: row.line_order,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceTaxTotalRow {
  id: Uuid,
  invoice_id: Uuid,
  vat_rate: String,
  amount: String,
}

impl TryFrom<InvoiceTaxTotalRow> for InvoiceTaxTotal {
  type Error = InvoiceError;

  fn try_from(row: InvoiceTaxTotalRow) -> Result<Self, Self::Error> {
    let rate = VatRate::new(parse_decimal(&row.vat_rate, "vat_rate")?)?;
    let amount = parse_decimal(&row.amount, "amount")?;

    Ok(InvoiceTaxTotal {
      id: row.id,
      invoice_id: row.invoice_id,
      rate,
      amount,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceWithClientRow {
  id: Uuid,
  reference: String,
  invoice_date: NaiveDate,
  due_date: NaiveDate,
  client_id: Uuid,
  total_ht: String,
  total_ttc: String,
  payment_terms: String,
  client_name: String,
}

impl TryFrom<InvoiceWithClientRow> for InvoiceWithClient {
  type Error = InvoiceError;

  fn try_from(row: InvoiceWithClientRow) -> Result<Self, Self::Error> {
    let invoice = InvoiceRow {
      id: row.id,
      reference: row.reference,
      invoice_date: row.invoice_date,
      due_date: row.due_date,
      client_id: row.client_id,
      total_ht: row.total_ht,
      total_ttc: row.total_ttc,
      payment_terms: row.payment_terms,
    }
    .try_into()?;

    Ok(InvoiceWithClient {
      invoice,
      client_name: row.client_name,
    })
  }
}

pub struct SqliteInvoiceRepository {
  pool: SqlitePool,
}

impl SqliteInvoiceRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
  async fn next_sequence_number(&self) -> Result<i64, InvoiceError> {
    // Single-statement upsert: concurrent callers serialize on the row and
    // each draws a distinct number
    let next = sqlx::query_scalar::<_, i64>(
      r#"
            INSERT INTO invoice_sequence (id, last_number)
            VALUES (1, 1)
            ON CONFLICT (id) DO UPDATE SET last_number = last_number + 1
            RETURNING last_number
            "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(next)
  }

  async fn create(
    &self,
    invoice: Invoice,
    lines: Vec<InvoiceLine>,
    tax_totals: Vec<InvoiceTaxTotal>,
  ) -> Result<Invoice, InvoiceError> {
    let reference_value = invoice.reference.value().to_string();

    let mut tx = self.pool.begin().await?;

    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (id, reference, invoice_date, due_date, client_id,
                                  total_ht, total_ttc, payment_terms)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, reference, invoice_date, due_date, client_id,
                      total_ht, total_ttc, payment_terms
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.reference.value())
    .bind(invoice.invoice_date)
    .bind(invoice.due_date)
    .bind(invoice.client_id)
    .bind(invoice.total_ht.to_string())
    .bind(invoice.total_ttc.to_string())
    .bind(invoice.payment_terms.value())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
          return InvoiceError::ReferenceAlreadyExists(reference_value);
        }
      }
      InvoiceError::Database(e)
    })?;

    for line in &lines {
      sqlx::query(
        r#"
              INSERT INTO invoice_lines (id, invoice_id, product_id, designation,
                                         unit_price_ht, quantity, vat_rate, line_order)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              "#,
      )
      .bind(line.id)
      .bind(line.invoice_id)
      .bind(line.product_id)
      .bind(line.designation.value())
      .bind(line.unit_price_ht.value().to_string())
      .bind(line.quantity.value())
      .bind(line.vat_rate.value().to_string())
      .bind(line.line_order)
      .execute(&mut *tx)
      .await?;
    }

    for total in &tax_totals {
      sqlx::query(
        r#"
              INSERT INTO invoice_tax_totals (id, invoice_id, vat_rate, amount)
              VALUES (?, ?, ?, ?)
              "#,
      )
      .bind(total.id)
      .bind(total.invoice_id)
      .bind(total.rate.value().to_string())
      .bind(total.amount.to_string())
      .execute(&mut *tx)
      .await?;
    }

    // Dropping the transaction on any earlier error rolls everything back;
    // no partial invoice is ever visible
    tx.commit().await?;

    row.try_into()
  }

  async fn find_by_reference(&self, reference: &str) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, reference, invoice_date, due_date, client_id,
                   total_ht, total_ttc, payment_terms
            FROM invoices
            WHERE reference = ?
            "#,
    )
    .bind(reference)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_lines(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceLineRow>(
      r#"
            SELECT id, invoice_id, product_id, designation,
                   unit_price_ht, quantity, vat_rate, line_order
            FROM invoice_lines
            WHERE invoice_id = ?
            ORDER BY line_order ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_tax_totals(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<InvoiceTaxTotal>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceTaxTotalRow>(
      r#"
            SELECT id, invoice_id, vat_rate, amount
            FROM invoice_tax_totals
            WHERE invoice_id = ?
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    // Rates are stored as TEXT; order numerically after parsing
    let mut totals = rows
      .into_iter()
      .map(|r| r.try_into())
      .collect::<Result<Vec<InvoiceTaxTotal>, _>>()?;
    totals.sort_by(|a, b| a.rate.cmp(&b.rate));

    Ok(totals)
  }

  async fn list_with_client(&self) -> Result<Vec<InvoiceWithClient>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceWithClientRow>(
      r#"
            SELECT i.id, i.reference, i.invoice_date, i.due_date, i.client_id,
                   i.total_ht, i.total_ttc, i.payment_terms, c.name AS client_name
            FROM invoices i
            JOIN clients c ON c.id = i.client_id
            ORDER BY i.reference ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoicing::{
    Client, ClientCode, ClientName, InvoiceTotals, Product,
    ports::{ClientRepository, ProductRepository},
  };
  use crate::infrastructure::persistence::sqlite::{
    SqliteClientRepository, SqliteProductRepository,
  };
  use rust_decimal_macros::dec;
  use sqlx::sqlite::SqlitePoolOptions;

  async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .connect("sqlite::memory:")
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    pool
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  async fn insert_client(pool: &SqlitePool) -> Client {
    let repo = SqliteClientRepository::new(pool.clone());
    repo
      .insert(Client::new(
        ClientCode::new("CU2203-0005".to_string()).unwrap(),
        ClientName::new("Mon client SAS".to_string()).unwrap(),
        Some("45, rue du test".to_string()),
        Some("75016".to_string()),
        Some("PARIS".to_string()),
      ))
      .await
      .unwrap()
  }

  async fn insert_product(pool: &SqlitePool, designation: &str) -> Product {
    let repo = SqliteProductRepository::new(pool.clone());
    repo
      .insert(Product::new(
        Designation::new(designation.to_string()).unwrap(),
        UnitPrice::new(dec!(50000.00)).unwrap(),
        Uuid::new_v4(),
      ))
      .await
      .unwrap()
  }

  fn build_invoice(client_id: Uuid, sequence: i64) -> Invoice {
    Invoice::new(
      InvoiceReference::from_parts(2024, sequence),
      date(2024, 6, 1),
      date(2024, 7, 1),
      client_id,
      PaymentTerms::new("Règlement à la livraison".to_string()).unwrap(),
    )
  }

  fn build_line(
    invoice_id: Uuid,
    product: &Product,
    quantity: i64,
    rate: rust_decimal::Decimal,
    order: i32,
  ) -> InvoiceLine {
    InvoiceLine::new(
      invoice_id,
      product.id,
      product.designation.clone(),
      product.unit_price_ht.clone(),
      Quantity::new(quantity).unwrap(),
      VatRate::new(rate).unwrap(),
      order,
    )
  }

  #[tokio::test]
  async fn test_next_sequence_number_increments() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool);

    assert_eq!(repo.next_sequence_number().await.unwrap(), 1);
    assert_eq!(repo.next_sequence_number().await.unwrap(), 2);
    assert_eq!(repo.next_sequence_number().await.unwrap(), 3);
  }

  #[tokio::test]
  async fn test_create_and_find_by_reference() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool.clone());
    let client = insert_client(&pool).await;
    let product = insert_product(&pool, "Mon produit A").await;

    let mut invoice = build_invoice(client.id, 1);
    let lines = vec![build_line(invoice.id, &product, 2, dec!(20.0), 1)];
    let totals = InvoiceTotals::calculate(&lines);
    invoice.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(invoice.id);

    let created = repo.create(invoice, lines, tax_totals).await.unwrap();
    assert_eq!(created.reference.value(), "2024-0001");
    assert_eq!(created.total_ht, dec!(100000.00));

    let found = repo.find_by_reference("2024-0001").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.total_ttc, created.total_ttc);
    assert_eq!(found.payment_terms.value(), "Règlement à la livraison");
  }

  #[tokio::test]
  async fn test_find_by_reference_missing_returns_none() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool);

    let found = repo.find_by_reference("2024-9999").await.unwrap();
    assert!(found.is_none());
  }

  #[tokio::test]
  async fn test_create_persists_lines_in_order_and_sorted_totals() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool.clone());
    let client = insert_client(&pool).await;
    let product_a = insert_product(&pool, "Mon produit A").await;
    let product_b = insert_product(&pool, "Mon produit B").await;

    let mut invoice = build_invoice(client.id, 1);
    let lines = vec![
      build_line(invoice.id, &product_a, 1, dec!(20.0), 1),
      build_line(invoice.id, &product_b, 3, dec!(5.5), 2),
    ];
    let totals = InvoiceTotals::calculate(&lines);
    invoice.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(invoice.id);

    let created = repo.create(invoice, lines, tax_totals).await.unwrap();

    let stored_lines = repo.find_lines(created.id).await.unwrap();
    assert_eq!(stored_lines.len(), 2);
    assert_eq!(stored_lines[0].designation.value(), "Mon produit A");
    assert_eq!(stored_lines[0].line_order, 1);
    assert_eq!(stored_lines[1].designation.value(), "Mon produit B");
    assert_eq!(stored_lines[1].line_order, 2);

    let stored_totals = repo.find_tax_totals(created.id).await.unwrap();
    assert_eq!(stored_totals.len(), 2);
    // Numeric order, not the lexicographic order of the TEXT column
    assert_eq!(stored_totals[0].rate.value(), dec!(5.5));
    assert_eq!(stored_totals[1].rate.value(), dec!(20.0));
  }

  #[tokio::test]
  async fn test_duplicate_reference_is_rejected() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool.clone());
    let client = insert_client(&pool).await;
    let product = insert_product(&pool, "Mon produit A").await;

    let mut first = build_invoice(client.id, 1);
    let lines = vec![build_line(first.id, &product, 1, dec!(20.0), 1)];
    let totals = InvoiceTotals::calculate(&lines);
    first.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(first.id);
    repo.create(first, lines, tax_totals).await.unwrap();

    let mut second = build_invoice(client.id, 1);
    let lines = vec![build_line(second.id, &product, 1, dec!(20.0), 1)];
    let totals = InvoiceTotals::calculate(&lines);
    second.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(second.id);

    let result = repo.create(second, lines, tax_totals).await;
    match result.unwrap_err() {
      InvoiceError::ReferenceAlreadyExists(reference) => {
        assert_eq!(reference, "2024-0001");
      }
      other => panic!("Expected ReferenceAlreadyExists, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_failed_create_leaves_no_rows() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool.clone());
    let client = insert_client(&pool).await;
    let product = insert_product(&pool, "Mon produit A").await;

    let mut invoice = build_invoice(client.id, 1);
    // Second line references a missing product, violating the foreign key
    let lines = vec![
      build_line(invoice.id, &product, 1, dec!(20.0), 1),
      InvoiceLine::new(
        invoice.id,
        Uuid::new_v4(),
        Designation::new("Produit fantôme".to_string()).unwrap(),
        UnitPrice::new(dec!(100.00)).unwrap(),
        Quantity::new(1).unwrap(),
        VatRate::new(dec!(20.0)).unwrap(),
        2,
      ),
    ];
    let totals = InvoiceTotals::calculate(&lines);
    invoice.apply_totals(&totals);
    let tax_totals = totals.breakdown_rows(invoice.id);

    let result = repo.create(invoice, lines, tax_totals).await;
    assert!(result.is_err());

    // The whole transaction rolled back, including the invoice row
    assert!(repo.find_by_reference("2024-0001").await.unwrap().is_none());
    let orphan_lines = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoice_lines")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(orphan_lines, 0);
  }

  #[tokio::test]
  async fn test_list_with_client() {
    let pool = setup_test_db().await;
    let repo = SqliteInvoiceRepository::new(pool.clone());
    let client = insert_client(&pool).await;
    let product = insert_product(&pool, "Mon produit A").await;

    for sequence in [2, 1] {
      let mut invoice = build_invoice(client.id, sequence);
      let lines = vec![build_line(invoice.id, &product, 1, dec!(20.0), 1)];
      let totals = InvoiceTotals::calculate(&lines);
      invoice.apply_totals(&totals);
      let tax_totals = totals.breakdown_rows(invoice.id);
      repo.create(invoice, lines, tax_totals).await.unwrap();
    }

    let listed = repo.list_with_client().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].invoice.reference.value(), "2024-0001");
    assert_eq!(listed[1].invoice.reference.value(), "2024-0002");
    assert!(listed.iter().all(|i| i.client_name == "Mon client SAS"));
  }
}
