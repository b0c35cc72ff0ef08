use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::domain::invoicing::{
  Client, ClientCode, ClientName, errors::InvoiceError, ports::ClientRepository,
};

#[derive(Debug, FromRow)]
struct ClientRow {
  id: Uuid,
  code: String,
  name: String,
  street: Option<String>,
  postal_code: Option<String>,
  city: Option<String>,
}

impl TryFrom<ClientRow> for Client {
  type Error = InvoiceError;

  fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
    let code = ClientCode::new(row.code)?;
    let name = ClientName::new(row.name)?;

    Ok(Client {
      id: row.id,
      code,
      name,
      street: row.street,
      postal_code: row.postal_code,
      city: row.city,
    })
  }
}

pub struct SqliteClientRepository {
  pool: SqlitePool,
}

impl SqliteClientRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
  async fn insert(&self, client: Client) -> Result<Client, InvoiceError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            INSERT INTO clients (id, code, name, street, postal_code, city)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, code, name, street, postal_code, city
            "#,
    )
    .bind(client.id)
    .bind(client.code.value())
    .bind(client.name.value())
    .bind(client.street.as_deref())
    .bind(client.postal_code.as_deref())
    .bind(client.city.as_deref())
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, InvoiceError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, code, name, street, postal_code, city
            FROM clients
            WHERE id = ?
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_code(&self, code: &str) -> Result<Option<Client>, InvoiceError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, code, name, street, postal_code, city
            FROM clients
            WHERE code = ?
            "#,
    )
    .bind(code)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list(&self) -> Result<Vec<Client>, InvoiceError> {
    let rows = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, code, name, street, postal_code, city
            FROM clients
            ORDER BY code ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn count(&self) -> Result<i64, InvoiceError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
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

  fn sample_client(code: &str, name: &str) -> Client {
    Client::new(
      ClientCode::new(code.to_string()).unwrap(),
      ClientName::new(name.to_string()).unwrap(),
      Some("45, rue du test".to_string()),
      Some("75016".to_string()),
      Some("PARIS".to_string()),
    )
  }

  #[tokio::test]
  async fn test_insert_and_find_by_code() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    let client = sample_client("CU2203-0005", "Mon client SAS");
    let created = repo.insert(client.clone()).await.unwrap();
    assert_eq!(created.id, client.id);

    let found = repo.find_by_code("CU2203-0005").await.unwrap();
    assert!(found.is_some());

    let found = found.unwrap();
    assert_eq!(found.name.value(), "Mon client SAS");
    assert_eq!(found.city.as_deref(), Some("PARIS"));
  }

  #[tokio::test]
  async fn test_find_by_code_missing_returns_none() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    let found = repo.find_by_code("CU0000-0000").await.unwrap();
    assert!(found.is_none());
  }

  #[tokio::test]
  async fn test_find_by_id() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    let client = repo
      .insert(sample_client("CU2203-0005", "Mon client SAS"))
      .await
      .unwrap();

    let found = repo.find_by_id(client.id).await.unwrap();
    assert_eq!(found.unwrap().code.value(), "CU2203-0005");

    let missing = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
  }

  #[tokio::test]
  async fn test_list_ordered_by_code() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    repo
      .insert(sample_client("CU2203-0007", "Client B"))
      .await
      .unwrap();
    repo
      .insert(sample_client("CU2203-0005", "Client A"))
      .await
      .unwrap();

    let clients = repo.list().await.unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].code.value(), "CU2203-0005");
    assert_eq!(clients[1].code.value(), "CU2203-0007");
  }

  #[tokio::test]
  async fn test_count() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    assert_eq!(repo.count().await.unwrap(), 0);

    repo
      .insert(sample_client("CU2203-0005", "Mon client SAS"))
      .await
      .unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_duplicate_code_rejected() {
    let pool = setup_test_db().await;
    let repo = SqliteClientRepository::new(pool);

    repo
      .insert(sample_client("CU2203-0005", "Client One"))
      .await
      .unwrap();

    let result = repo.insert(sample_client("CU2203-0005", "Client Two")).await;
    assert!(result.is_err());
  }
}
