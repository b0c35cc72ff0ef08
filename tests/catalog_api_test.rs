//! Catalog endpoint integration tests: clients, products and VAT rates.

mod common;

use actix_web::{App, http::StatusCode, test};
use facturier::adapters::http::configure_api_routes;
use serde_json::{Value, json};

#[actix_web::test]
async fn list_clients_returns_seeded_client() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get().uri("/api/clients").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  let clients = body.as_array().unwrap();
  assert_eq!(clients.len(), 1);
  assert_eq!(clients[0]["code"], "CU2203-0005");
  assert_eq!(clients[0]["nom"], "Mon client SAS");
  assert!(clients[0]["id"].is_string());
}

#[actix_web::test]
async fn get_client_returns_full_record() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/clients/CU2203-0005")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["code"], "CU2203-0005");
  assert_eq!(body["nom"], "Mon client SAS");
  assert_eq!(body["adresse"], "45, rue du test");
  assert_eq!(body["code_postal"], "75016");
  assert_eq!(body["ville"], "PARIS");
}

#[actix_web::test]
async fn get_unknown_client_returns_404() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/clients/CU0000-0000")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "client_not_found");
}

#[actix_web::test]
async fn list_products_returns_catalog_in_order() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get().uri("/api/produits").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  let products = body.as_array().unwrap();
  assert_eq!(products.len(), 4);

  let designations: Vec<&str> = products
    .iter()
    .map(|p| p["designation"].as_str().unwrap())
    .collect();
  assert_eq!(
    designations,
    vec![
      "Mon produit A",
      "Mon produit B",
      "Mon produit C",
      "Mon produit D"
    ]
  );
  assert_eq!(products[0]["prix_unitaire_ht"], json!(50000.0));
  assert_eq!(products[1]["prix_unitaire_ht"], json!(3500.0));
}

#[actix_web::test]
async fn effective_rates_default_to_today() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  // All three seeded intervals are open-ended and started in the past
  let req = test::TestRequest::get()
    .uri("/api/tva/en-vigueur")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  let rates = body.as_array().unwrap();
  assert_eq!(rates.len(), 3);

  // Ordered by interval start
  assert_eq!(rates[0]["taux"], json!(7.0));
  assert_eq!(rates[1]["taux"], json!(5.5));
  assert_eq!(rates[2]["taux"], json!(20.0));
  assert!(rates.iter().all(|r| r["date_fin"].is_null()));
}

#[actix_web::test]
async fn effective_rates_filter_by_date() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  // Mid-2022: only the intermediate rate interval has started
  let req = test::TestRequest::get()
    .uri("/api/tva/en-vigueur?date=2022-06-01")
    .to_request();
  let resp = test::call_service(&app, req).await;
  let body: Value = test::read_body_json(resp).await;
  let rates = body.as_array().unwrap();
  assert_eq!(rates.len(), 1);
  assert_eq!(rates[0]["taux"], json!(7.0));
  assert_eq!(rates[0]["date_debut"], "2022-01-01");

  // Mid-2023: the reduced rate has joined it
  let req = test::TestRequest::get()
    .uri("/api/tva/en-vigueur?date=2023-06-01")
    .to_request();
  let resp = test::call_service(&app, req).await;
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn effective_rates_before_any_interval_are_empty() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/tva/en-vigueur?date=2021-06-01")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn effective_rates_reject_malformed_date() {
  let test_app = common::spawn_app().await;
  let app = test::init_service(
    App::new().configure(|cfg| configure_api_routes(cfg, test_app.deps.clone())),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/tva/en-vigueur?date=hier")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
