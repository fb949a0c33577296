//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use cafe_core::{Cafe, CafeError, CafeStore, NewCafe};
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::create_schema(&pool)
            .await
            .context("Failed to create cafe table")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Private in-memory database. One connection, so every query sees the
    /// same data.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::create_schema(&pool).await?;

        Ok(Self { pool })
    }

    async fn create_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cafe (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(250) NOT NULL UNIQUE,
                map_url VARCHAR(500) NOT NULL,
                img_url VARCHAR(500) NOT NULL,
                location VARCHAR(250) NOT NULL,
                seats VARCHAR(250) NOT NULL,
                has_toilet BOOLEAN NOT NULL,
                has_wifi BOOLEAN NOT NULL,
                has_sockets BOOLEAN NOT NULL,
                can_take_calls BOOLEAN NOT NULL,
                coffee_price VARCHAR(250)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CafeStore for Database {
    async fn list_all(&self) -> cafe_core::Result<Vec<Cafe>> {
        let rows: Vec<CafeRow> =
            sqlx::query_as(&format!("SELECT {CAFE_COLUMNS} FROM cafe ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i64) -> cafe_core::Result<Option<Cafe>> {
        let row: Option<CafeRow> =
            sqlx::query_as(&format!("SELECT {CAFE_COLUMNS} FROM cafe WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, cafe: NewCafe) -> cafe_core::Result<Cafe> {
        let row: CafeRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING {CAFE_COLUMNS}
            "#
        ))
        .bind(cafe.name)
        .bind(cafe.map_url)
        .bind(cafe.img_url)
        .bind(cafe.location)
        .bind(cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(cafe.coffee_price)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn update_price(&self, id: i64, new_price: Option<String>) -> cafe_core::Result<()> {
        let result = sqlx::query("UPDATE cafe SET coffee_price = ?1 WHERE id = ?2")
            .bind(new_price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CafeError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> cafe_core::Result<()> {
        let result = sqlx::query("DELETE FROM cafe WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CafeError::NotFound(id));
        }
        Ok(())
    }
}

/// Constraint failures are the caller's fault; anything else is ours.
fn storage_error(e: sqlx::Error) -> CafeError {
    if let sqlx::Error::Database(db_err) = &e {
        if matches!(
            db_err.kind(),
            ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::CheckViolation
        ) {
            return CafeError::ConstraintViolation(db_err.message().to_string());
        }
    }
    CafeError::Database(e.to_string())
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    map_url: String,
    img_url: String,
    location: String,
    seats: String,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
    coffee_price: Option<String>,
}

impl From<CafeRow> for Cafe {
    fn from(r: CafeRow) -> Self {
        Cafe {
            id: r.id,
            name: r.name,
            map_url: r.map_url,
            img_url: r.img_url,
            location: r.location,
            seats: r.seats,
            has_toilet: r.has_toilet,
            has_wifi: r.has_wifi,
            has_sockets: r.has_sockets,
            can_take_calls: r.can_take_calls,
            coffee_price: r.coffee_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cafe(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: Some(name.to_string()),
            map_url: Some(format!("https://maps.example/{name}")),
            img_url: Some(format!("https://img.example/{name}.jpg")),
            location: Some(location.to_string()),
            seats: Some("20-30".to_string()),
            has_toilet: true,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£2.50".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() -> Result<()> {
        let db = Database::in_memory().await?;

        let first = db.insert(new_cafe("Science Gallery", "London Bridge")).await?;
        let second = db.insert(new_cafe("Bar Polski", "Holborn")).await?;

        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Science Gallery");
        assert_eq!(first.coffee_price.as_deref(), Some("£2.50"));

        let all = db.list_all().await?;
        assert_eq!(all, vec![first, second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint_violation() -> Result<()> {
        let db = Database::in_memory().await?;
        db.insert(new_cafe("Blue Bottle", "Peckham")).await?;

        let err = db
            .insert(new_cafe("Blue Bottle", "Shoreditch"))
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::ConstraintViolation(_)));
        assert_eq!(db.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_required_field_is_constraint_violation() -> Result<()> {
        let db = Database::in_memory().await?;
        let mut cafe = new_cafe("Nameless Seats", "Hackney");
        cafe.seats = None;

        let err = db.insert(cafe).await.unwrap_err();
        assert!(matches!(err, CafeError::ConstraintViolation(_)));
        assert!(db.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_price_is_allowed() -> Result<()> {
        let db = Database::in_memory().await?;
        let mut cafe = new_cafe("Free Coffee", "Bermondsey");
        cafe.coffee_price = None;

        let stored = db.insert(cafe).await?;
        assert_eq!(stored.coffee_price, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_price_only_touches_price() -> Result<()> {
        let db = Database::in_memory().await?;
        let before = db.insert(new_cafe("Goswell Road", "Clerkenwell")).await?;

        db.update_price(before.id, Some("£3.10".to_string())).await?;

        let after = db.get_by_id(before.id).await?.unwrap();
        assert_eq!(after.coffee_price.as_deref(), Some("£3.10"));
        assert_eq!(
            Cafe {
                coffee_price: before.coffee_price.clone(),
                ..after
            },
            before
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_price_unknown_id() -> Result<()> {
        let db = Database::in_memory().await?;
        let cafe = db.insert(new_cafe("Mare Street Market", "Hackney")).await?;

        let err = db
            .update_price(cafe.id + 100, Some("£9.99".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::NotFound(id) if id == cafe.id + 100));
        assert_eq!(db.get_by_id(cafe.id).await?, Some(cafe));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let db = Database::in_memory().await?;
        let cafe = db.insert(new_cafe("Social - Wembley", "Wembley")).await?;

        db.delete(cafe.id).await?;
        assert_eq!(db.get_by_id(cafe.id).await?, None);

        let err = db.delete(cafe.id).await.unwrap_err();
        assert!(matches!(err, CafeError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backed_database_persists() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("nested").join("cafes.db");
        let path = path.to_string_lossy().to_string();

        let id = {
            let db = Database::new(&path).await?;
            let cafe = db.insert(new_cafe("The Peckham Pelican", "Peckham")).await?;
            db.pool.close().await;
            cafe.id
        };

        let reopened = Database::new(&path).await?;
        let cafe = reopened.get_by_id(id).await?.unwrap();
        assert_eq!(cafe.name, "The Peckham Pelican");
        Ok(())
    }
}
