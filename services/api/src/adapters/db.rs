//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use newsdesk_core::domain::{NewUser, SummaryRecord, TranslationRecord, UserCredentials};
use newsdesk_core::ports::{DatabaseService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn map_db_error(e: sqlx::Error) -> PortError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PortError::Conflict("Email already exists.".to_string())
        }
        _ => PortError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserCredentialsRecord {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    country: Option<String>,
    payment_method: Option<String>,
}
impl UserCredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            country: self.country,
            payment_method: self.payment_method,
        }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: Uuid,
    user_id: Uuid,
    filename: String,
    source_text: String,
    summary: String,
    created_at: DateTime<Utc>,
}
impl SummaryRow {
    fn to_domain(self) -> SummaryRecord {
        SummaryRecord {
            id: self.id,
            user_id: self.user_id,
            filename: self.filename,
            source_text: self.source_text,
            summary: self.summary,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct TranslationRow {
    id: Uuid,
    user_id: Uuid,
    filename: String,
    original_text: String,
    translated_text: String,
    language: String,
    created_at: DateTime<Utc>,
}
impl TranslationRow {
    fn to_domain(self) -> TranslationRecord {
        TranslationRecord {
            id: self.id,
            user_id: self.user_id,
            filename: self.filename,
            original_text: self.original_text,
            translated_text: self.translated_text,
            language: self.language,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(&self, new_user: &NewUser) -> PortResult<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO users \
             (first_name, last_name, country, date_of_birth, phone, email, password_hash, payment_method) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.country)
        .bind(new_user.date_of_birth)
        .bind(&new_user.phone)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.payment_method)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record: UserCredentialsRecord = sqlx::query_as(
            "SELECT id, first_name, last_name, email, password_hash, country, payment_method \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("No user with email {}", email))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn save_summary(
        &self,
        user_id: Uuid,
        filename: &str,
        source_text: &str,
        summary: &str,
    ) -> PortResult<SummaryRecord> {
        let row: SummaryRow = sqlx::query_as(
            "INSERT INTO summaries (user_id, filename, source_text, summary) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, filename, source_text, summary, created_at",
        )
        .bind(user_id)
        .bind(filename)
        .bind(source_text)
        .bind(summary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(row.to_domain())
    }

    async fn save_translation(
        &self,
        user_id: Uuid,
        filename: &str,
        original_text: &str,
        translated_text: &str,
        language: &str,
    ) -> PortResult<TranslationRecord> {
        let row: TranslationRow = sqlx::query_as(
            "INSERT INTO translations (user_id, filename, original_text, translated_text, language) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_id, filename, original_text, translated_text, language, created_at",
        )
        .bind(user_id)
        .bind(filename)
        .bind(original_text)
        .bind(translated_text)
        .bind(language)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(row.to_domain())
    }

    async fn list_summaries_for_user(&self, user_id: Uuid) -> PortResult<Vec<SummaryRecord>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            "SELECT id, user_id, filename, source_text, summary, created_at \
             FROM summaries WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_translations_for_user(
        &self,
        user_id: Uuid,
    ) -> PortResult<Vec<TranslationRecord>> {
        let rows: Vec<TranslationRow> = sqlx::query_as(
            "SELECT id, user_id, filename, original_text, translated_text, language, created_at \
             FROM translations WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }
}
