//! PostgreSQL gateway: pool setup, catalog DDL and the `CatalogStore` seam the service talks to.

use crate::config::DatabaseSettings;
use crate::error::AppError;
use crate::model::{Breed, BreedData, Cat, CatData, WriteOutcome};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool, Postgres, Transaction};

/// Data access used by `CatalogService`. Reads return empty/None for "nothing there";
/// deciding whether that is an error is left to the service.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
    async fn list_cats(&self) -> Result<Vec<Cat>, AppError>;
    async fn list_breeds(&self) -> Result<Vec<Breed>, AppError>;
    /// Exact, case-sensitive match on breed name.
    async fn list_cats_by_breed(&self, breed_name: &str) -> Result<Vec<Cat>, AppError>;
    async fn get_cat(&self, cat_id: i32) -> Result<Option<Cat>, AppError>;
    /// Insert in one transaction; returns the new id.
    async fn insert_cat(&self, data: &CatData) -> Result<i32, AppError>;
    /// Locked lookup then full overwrite, in one transaction.
    async fn update_cat(&self, cat_id: i32, data: &CatData) -> Result<WriteOutcome, AppError>;
    /// Locked lookup then delete, in one transaction.
    async fn delete_cat(&self, cat_id: i32) -> Result<WriteOutcome, AppError>;
    async fn insert_breed(&self, data: &BreedData) -> Result<Breed, AppError>;
}

/// Build the connection pool. Connections go back to the pool when the
/// handle holding them is dropped, on every exit path.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(settings.connect_options()?)
        .await?;
    Ok(pool)
}

/// Ensure the database named in `options` exists; create it if not. Connects to the
/// server's `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn: PgConnection = options.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Create `breed` and `cat` if missing. A breed that still has cats cannot be deleted.
pub async fn ensure_catalog_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS breed (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cat (
            id SERIAL PRIMARY KEY,
            color VARCHAR(100) NOT NULL,
            age_in_months INTEGER NOT NULL CHECK (age_in_months > 0),
            description TEXT,
            breed_id INTEGER NOT NULL REFERENCES breed (id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS cat_breed_id_idx ON cat (breed_id)")
        .execute(pool)
        .await?;
    Ok(())
}

const CAT_SELECT: &str = "SELECT c.id, c.color, c.age_in_months, c.description, \
     b.id AS breed_id, b.name AS breed_name \
     FROM cat c JOIN breed b ON b.id = c.breed_id";

#[derive(sqlx::FromRow)]
struct CatRow {
    id: i32,
    color: String,
    age_in_months: i32,
    description: Option<String>,
    breed_id: i32,
    breed_name: String,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Cat {
            id: row.id,
            color: row.color,
            age_in_months: row.age_in_months,
            description: row.description,
            breed: Breed {
                id: row.breed_id,
                name: row.breed_name,
            },
        }
    }
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Commit on success, roll back before handing the error up otherwise.
async fn finish<T>(tx: Transaction<'_, Postgres>, result: Result<T, AppError>) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

async fn lock_cat(conn: &mut PgConnection, cat_id: i32) -> Result<bool, AppError> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT id FROM cat WHERE id = $1 FOR UPDATE")
        .bind(cat_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

async fn overwrite_cat(conn: &mut PgConnection, cat_id: i32, data: &CatData) -> Result<WriteOutcome, AppError> {
    if !lock_cat(conn, cat_id).await? {
        return Ok(WriteOutcome::NotFound);
    }
    sqlx::query("UPDATE cat SET color = $1, age_in_months = $2, description = $3, breed_id = $4 WHERE id = $5")
        .bind(&data.color)
        .bind(data.age_in_months)
        .bind(&data.description)
        .bind(data.breed_id)
        .bind(cat_id)
        .execute(&mut *conn)
        .await?;
    Ok(WriteOutcome::Applied)
}

async fn remove_cat(conn: &mut PgConnection, cat_id: i32) -> Result<WriteOutcome, AppError> {
    if !lock_cat(conn, cat_id).await? {
        return Ok(WriteOutcome::NotFound);
    }
    sqlx::query("DELETE FROM cat WHERE id = $1")
        .bind(cat_id)
        .execute(&mut *conn)
        .await?;
    Ok(WriteOutcome::Applied)
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, AppError> {
        let sql = format!("{} ORDER BY c.id", CAT_SELECT);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<CatRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, AppError> {
        let rows: Vec<Breed> = sqlx::query_as("SELECT id, name FROM breed ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_cats_by_breed(&self, breed_name: &str) -> Result<Vec<Cat>, AppError> {
        let sql = format!("{} WHERE b.name = $1 ORDER BY c.id", CAT_SELECT);
        tracing::debug!(sql = %sql, breed = %breed_name, "query");
        let rows: Vec<CatRow> = sqlx::query_as(&sql).bind(breed_name).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    async fn get_cat(&self, cat_id: i32) -> Result<Option<Cat>, AppError> {
        let sql = format!("{} WHERE c.id = $1", CAT_SELECT);
        tracing::debug!(sql = %sql, cat_id, "query");
        let row: Option<CatRow> = sqlx::query_as(&sql).bind(cat_id).fetch_optional(&self.pool).await?;
        Ok(row.map(Cat::from))
    }

    async fn insert_cat(&self, data: &CatData) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO cat (color, age_in_months, description, breed_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&data.color)
        .bind(data.age_in_months)
        .bind(&data.description)
        .bind(data.breed_id)
        .fetch_one(&mut *tx)
        .await
        .map(|(id,)| id)
        .map_err(AppError::Db);
        finish(tx, result).await
    }

    async fn update_cat(&self, cat_id: i32, data: &CatData) -> Result<WriteOutcome, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = overwrite_cat(&mut tx, cat_id, data).await;
        finish(tx, result).await
    }

    async fn delete_cat(&self, cat_id: i32) -> Result<WriteOutcome, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = remove_cat(&mut tx, cat_id).await;
        finish(tx, result).await
    }

    async fn insert_breed(&self, data: &BreedData) -> Result<Breed, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, Breed>("INSERT INTO breed (name) VALUES ($1) RETURNING id, name")
            .bind(&data.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Db);
        finish(tx, result).await
    }
}
