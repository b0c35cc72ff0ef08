use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoicing::{InvoiceError, TaxRateResolver};

#[derive(Debug, Deserialize)]
pub struct ListEffectiveRatesCommand {
  /// Reference date; the server's current date when absent.
  pub on_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct EffectiveRateDto {
  pub rate: Decimal,
  pub valid_from: NaiveDate,
  pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ListEffectiveRatesResponse {
  pub rates: Vec<EffectiveRateDto>,
}

pub struct ListEffectiveRatesUseCase {
  rate_resolver: Arc<TaxRateResolver>,
}

impl ListEffectiveRatesUseCase {
  pub fn new(rate_resolver: Arc<TaxRateResolver>) -> Self {
    Self { rate_resolver }
  }

  pub async fn execute(
    &self,
    command: ListEffectiveRatesCommand,
  ) -> Result<ListEffectiveRatesResponse, InvoiceError> {
    let on_date = command.on_date.unwrap_or_else(|| Utc::now().date_naive());

    let rates = self.rate_resolver.effective_on(on_date).await?;

    let rate_dtos = rates
      .into_iter()
      .map(|rate| EffectiveRateDto {
        rate: rate.rate.value(),
        valid_from: rate.valid_from,
        valid_until: rate.valid_until,
      })
      .collect();

    Ok(ListEffectiveRatesResponse { rates: rate_dtos })
  }
}
