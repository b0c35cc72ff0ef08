//! Demo dataset loaded on startup when the store is empty.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::invoicing::{
  Client, ClientCode, ClientName, Designation, Product, TaxRate, UnitPrice, VatRate,
  errors::InvoiceError,
  ports::{ClientRepository, ProductRepository, TaxRateRepository},
};

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("Hardcoded seed date is valid")
}

/// Insert one demo client, four products and the rate history of their
/// tax categories. Runs only against an empty store, so a restart never
/// duplicates rows.
pub async fn seed_demo_data(
  client_repo: &dyn ClientRepository,
  product_repo: &dyn ProductRepository,
  rate_repo: &dyn TaxRateRepository,
) -> Result<(), InvoiceError> {
  if client_repo.count().await? > 0 {
    tracing::debug!("Store already populated, skipping demo seed");
    return Ok(());
  }

  tracing::info!("Seeding demo data");

  client_repo
    .insert(Client::new(
      ClientCode::new("CU2203-0005".to_string())?,
      ClientName::new("Mon client SAS".to_string())?,
      Some("45, rue du test".to_string()),
      Some("75016".to_string()),
      Some("PARIS".to_string()),
    ))
    .await?;

  let standard = Uuid::new_v4();
  let reduced = Uuid::new_v4();
  let intermediate = Uuid::new_v4();

  let products = [
    ("Mon produit A", dec!(50000.00), standard),
    ("Mon produit B", dec!(3500.00), reduced),
    ("Mon produit C", dec!(2000.00), intermediate),
    ("Mon produit D", dec!(4000.00), intermediate),
  ];
  for (designation, price, category_id) in products {
    product_repo
      .insert(Product::new(
        Designation::new(designation.to_string())?,
        UnitPrice::new(price)?,
        category_id,
      ))
      .await?;
  }

  // Open-ended intervals: each category keeps its current rate until a
  // later interval supersedes it
  let rates = [
    (standard, dec!(20.0), seed_date(2024, 1, 1)),
    (reduced, dec!(5.5), seed_date(2023, 1, 1)),
    (intermediate, dec!(7.0), seed_date(2022, 1, 1)),
  ];
  for (category_id, rate, valid_from) in rates {
    rate_repo
      .insert(TaxRate::new(category_id, VatRate::new(rate)?, valid_from, None))
      .await?;
  }

  Ok(())
}
