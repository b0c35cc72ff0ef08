use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

// Request and response bodies use the French field names of the public
// API; the application layer stays English.

/// One line of an invoice generation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LigneFactureRequest {
  /// Designation of the product to bill
  #[validate(length(min = 1, message = "designationId is required"))]
  pub designation_id: String,

  /// Number of units billed
  #[validate(range(min = 1, message = "quantite must be at least 1"))]
  pub quantite: i64,
}

/// Request to generate an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenererFactureRequest {
  /// Code of the billed client
  #[validate(length(min = 1, message = "codeClient is required"))]
  pub code_client: String,

  /// Issue date, also the date used to resolve VAT rates
  pub date_facturation: NaiveDate,

  /// Payment due date
  pub date_echeance: NaiveDate,

  /// Payment terms stored with the invoice
  #[validate(length(min = 1, message = "conditionsReglement is required"))]
  pub conditions_reglement: String,

  /// Invoice lines
  #[validate(length(min = 1, message = "At least one ligne is required"), nested)]
  pub lignes: Vec<LigneFactureRequest>,
}

/// Query string of the effective-rates endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct EnVigueurQuery {
  /// Reference date; today when absent
  pub date: Option<NaiveDate>,
}

/// Client list entry
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummaryResponse {
  pub id: Uuid,
  pub code: String,
  pub nom: String,
}

/// Full client record
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
  pub code: String,
  pub nom: String,
  pub adresse: Option<String>,
  pub code_postal: Option<String>,
  pub ville: Option<String>,
}

/// Product catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct ProduitResponse {
  pub id: Uuid,
  pub designation: String,
  pub prix_unitaire_ht: Decimal,
}

/// One VAT rate interval effective on the requested date
#[derive(Debug, Clone, Serialize)]
pub struct TauxTvaResponse {
  pub taux: Decimal,
  pub date_debut: NaiveDate,
  /// None for an open-ended interval
  pub date_fin: Option<NaiveDate>,
}

/// Invoice list entry
#[derive(Debug, Clone, Serialize)]
pub struct FactureSummaryResponse {
  pub id: Uuid,
  pub reference: String,
  pub date_facturation: NaiveDate,
  #[serde(rename = "nom du client")]
  pub nom_du_client: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
}

/// Response after generating an invoice
#[derive(Debug, Clone, Serialize)]
pub struct GenererFactureResponse {
  /// Reference assigned to the new invoice
  pub reference: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  /// Tax amount per rate, keyed by the rate value (e.g. "20.0")
  pub totaux_tva: BTreeMap<String, Decimal>,
}

/// One stored invoice line
#[derive(Debug, Clone, Serialize)]
pub struct LigneFactureResponse {
  pub designation: String,
  pub prix_unitaire_ht: Decimal,
  pub quantite: i64,
  pub taux_tva: Decimal,
}

/// Tax total for one rate of an invoice
#[derive(Debug, Clone, Serialize)]
pub struct TotalTvaResponse {
  pub taux: Decimal,
  pub montant: Decimal,
}

/// Full invoice with its snapshot lines and tax breakdown
#[derive(Debug, Clone, Serialize)]
pub struct FactureDetailsResponse {
  pub reference: String,
  pub date_facturation: NaiveDate,
  pub date_echeance: NaiveDate,
  /// Name of the billed client
  pub client: String,
  pub total_ht: Decimal,
  pub total_ttc: Decimal,
  pub lignes: Vec<LigneFactureResponse>,
  pub totaux_tva: Vec<TotalTvaResponse>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use validator::Validate;

  fn parse_generate_request(body: &str) -> GenererFactureRequest {
    serde_json::from_str(body).unwrap()
  }

  #[test]
  fn test_generate_request_accepts_french_field_names() {
    let request = parse_generate_request(
      r#"{
        "codeClient": "CU2203-0005",
        "dateFacturation": "2024-06-01",
        "dateEcheance": "2024-07-01",
        "conditionsReglement": "Règlement à la livraison",
        "lignes": [{"designationId": "Mon produit A", "quantite": 2}]
      }"#,
    );

    assert!(request.validate().is_ok());
    assert_eq!(request.code_client, "CU2203-0005");
    assert_eq!(request.lignes[0].designation_id, "Mon produit A");
    assert_eq!(request.lignes[0].quantite, 2);
  }

  #[test]
  fn test_generate_request_requires_every_field() {
    let body = r#"{
      "codeClient": "CU2203-0005",
      "dateFacturation": "2024-06-01",
      "lignes": [{"designationId": "Mon produit A", "quantite": 2}]
    }"#;

    assert!(serde_json::from_str::<GenererFactureRequest>(body).is_err());
  }

  #[test]
  fn test_generate_request_rejects_empty_lines() {
    let request = parse_generate_request(
      r#"{
        "codeClient": "CU2203-0005",
        "dateFacturation": "2024-06-01",
        "dateEcheance": "2024-07-01",
        "conditionsReglement": "Règlement à la livraison",
        "lignes": []
      }"#,
    );

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_generate_request_rejects_non_positive_quantity() {
    let request = parse_generate_request(
      r#"{
        "codeClient": "CU2203-0005",
        "dateFacturation": "2024-06-01",
        "dateEcheance": "2024-07-01",
        "conditionsReglement": "Règlement à la livraison",
        "lignes": [{"designationId": "Mon produit A", "quantite": 0}]
      }"#,
    );

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_invoice_summary_serializes_french_client_key() {
    let summary = FactureSummaryResponse {
      id: Uuid::new_v4(),
      reference: "2024-0001".to_string(),
      date_facturation: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
      nom_du_client: "Mon client SAS".to_string(),
      total_ht: dec!(100000.00),
      total_ttc: dec!(120000.00),
    };

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["nom du client"], "Mon client SAS");
    assert_eq!(json["reference"], "2024-0001");
  }

  #[test]
  fn test_generate_response_keys_tax_totals_by_rate() {
    let mut totaux_tva = BTreeMap::new();
    totaux_tva.insert("20.0".to_string(), dec!(20000.00));
    totaux_tva.insert("5.5".to_string(), dec!(192.50));

    let response = GenererFactureResponse {
      reference: "2024-0001".to_string(),
      total_ht: dec!(103500.00),
      total_ttc: dec!(123692.50),
      totaux_tva,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["totaux_tva"]["20.0"], serde_json::json!(20000.0));
    assert_eq!(json["totaux_tva"]["5.5"], serde_json::json!(192.5));
  }
}
