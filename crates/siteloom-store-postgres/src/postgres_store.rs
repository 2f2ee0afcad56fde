//! PostgresSiteStore - SiteStore/BookingStore implementation for PostgreSQL

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use siteloom_core::{
    site_store::{BookingStore, SiteStore},
    Booking, BookingStatus, ContentUpdate, Error, Result, SiteContent, SiteRecord, Subdomain,
    TenantId,
};

/// PostgreSQL-backed site store.
///
/// One row per tenant in `sites`, keyed by `tenant_id` with a unique index on
/// `subdomain` for resolver lookups; content lives in a JSONB column so the
/// schema evolves with `SiteContent`. Transient connection failures are
/// retried once, then surfaced as `Error::Upstream` - never as `NotFound`.
#[derive(Clone)]
pub struct PostgresSiteStore {
    pool: Arc<PgPool>,
}

impl PostgresSiteStore {
    /// Connect and run schema migrations.
    ///
    /// # Errors
    /// - `Error::Upstream` if the database is unreachable
    /// - `Error::Database` if migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| Error::Upstream(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let store = Self {
            pool: Arc::new(pool),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create from an existing pool (useful for testing)
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sites (
                tenant_id UUID PRIMARY KEY,
                subdomain TEXT NOT NULL,
                template_id TEXT NOT NULL,
                content JSONB NOT NULL,
                is_published BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT valid_content CHECK (jsonb_typeof(content) = 'object')
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create sites table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_sites_subdomain
            ON sites(subdomain)
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create subdomain index: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL REFERENCES sites(tenant_id) ON DELETE CASCADE,
                client_name TEXT NOT NULL,
                client_email TEXT NOT NULL,
                client_phone TEXT NOT NULL DEFAULT '',
                service_name TEXT NOT NULL,
                appointment_date DATE NOT NULL,
                appointment_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                notes TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create bookings table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bookings_tenant
            ON bookings(tenant_id, appointment_date)
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create bookings index: {}", e)))?;

        debug!("Postgres schema migrations complete");
        Ok(())
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Whether a sqlx error looks like a transient connectivity failure worth one
/// retry, as opposed to a query or data error.
fn is_transient(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

fn map_db_error(err: sqlx::Error, context: &str) -> Error {
    if is_transient(&err) {
        Error::Upstream(format!("{}: {}", context, err))
    } else {
        Error::Database(format!("{}: {}", context, err))
    }
}

/// Run a database operation, retrying once on a transient failure.
async fn with_retry<T, F, Fut>(context: &str, op: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match op().await {
        Ok(value) => Ok(value),
        Err(err) if is_transient(&err) => {
            warn!("{} failed transiently, retrying once: {}", context, err);
            op().await.map_err(|e| map_db_error(e, context))
        }
        Err(err) => Err(map_db_error(err, context)),
    }
}

fn record_from_row(row: &PgRow) -> Result<SiteRecord> {
    let subdomain: String = row
        .try_get("subdomain")
        .map_err(|e| Error::Database(format!("Failed to read subdomain column: {}", e)))?;
    let content: serde_json::Value = row
        .try_get("content")
        .map_err(|e| Error::Database(format!("Failed to read content column: {}", e)))?;
    let content: SiteContent = serde_json::from_value(content)?;

    Ok(SiteRecord {
        tenant_id: TenantId::from_uuid(
            row.try_get("tenant_id")
                .map_err(|e| Error::Database(format!("Failed to read tenant_id column: {}", e)))?,
        ),
        subdomain: Subdomain::new(&subdomain)?,
        template_id: row
            .try_get("template_id")
            .map_err(|e| Error::Database(format!("Failed to read template_id column: {}", e)))?,
        content,
        is_published: row
            .try_get("is_published")
            .map_err(|e| Error::Database(format!("Failed to read is_published column: {}", e)))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| Error::Database(format!("Failed to read created_at column: {}", e)))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| Error::Database(format!("Failed to read updated_at column: {}", e)))?,
    })
}

fn booking_from_row(row: &PgRow) -> Result<Booking> {
    let status: String = row
        .try_get("status")
        .map_err(|e| Error::Database(format!("Failed to read status column: {}", e)))?;

    Ok(Booking {
        id: row
            .try_get("id")
            .map_err(|e| Error::Database(format!("Failed to read id column: {}", e)))?,
        tenant_id: TenantId::from_uuid(
            row.try_get("tenant_id")
                .map_err(|e| Error::Database(format!("Failed to read tenant_id column: {}", e)))?,
        ),
        client_name: row
            .try_get("client_name")
            .map_err(|e| Error::Database(format!("Failed to read client_name column: {}", e)))?,
        client_email: row
            .try_get("client_email")
            .map_err(|e| Error::Database(format!("Failed to read client_email column: {}", e)))?,
        client_phone: row
            .try_get("client_phone")
            .map_err(|e| Error::Database(format!("Failed to read client_phone column: {}", e)))?,
        service_name: row
            .try_get("service_name")
            .map_err(|e| Error::Database(format!("Failed to read service_name column: {}", e)))?,
        appointment_date: row.try_get("appointment_date").map_err(|e| {
            Error::Database(format!("Failed to read appointment_date column: {}", e))
        })?,
        appointment_time: row.try_get("appointment_time").map_err(|e| {
            Error::Database(format!("Failed to read appointment_time column: {}", e))
        })?,
        status: BookingStatus::from_str(&status)?,
        notes: row
            .try_get("notes")
            .map_err(|e| Error::Database(format!("Failed to read notes column: {}", e)))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| Error::Database(format!("Failed to read created_at column: {}", e)))?,
    })
}

#[async_trait]
impl SiteStore for PostgresSiteStore {
    async fn get(&self, tenant_id: TenantId) -> Result<SiteRecord> {
        let row = with_retry("Failed to query site", || {
            sqlx::query("SELECT * FROM sites WHERE tenant_id = $1")
                .bind(tenant_id.as_uuid())
                .fetch_optional(&*self.pool)
        })
        .await?;

        match row {
            Some(row) => record_from_row(&row),
            None => Err(Error::NotFound),
        }
    }

    async fn get_by_subdomain(&self, subdomain: &Subdomain) -> Result<SiteRecord> {
        let row = with_retry("Failed to query site by subdomain", || {
            sqlx::query("SELECT * FROM sites WHERE subdomain = $1")
                .bind(subdomain.as_str())
                .fetch_optional(&*self.pool)
        })
        .await?;

        match row {
            Some(row) => record_from_row(&row),
            None => Err(Error::NotFound),
        }
    }

    async fn create(
        &self,
        tenant_id: TenantId,
        subdomain: Subdomain,
        template_id: String,
        content: SiteContent,
    ) -> Result<SiteRecord> {
        let content_json = serde_json::to_value(&content)?;

        let row = sqlx::query(
            r#"
            INSERT INTO sites (tenant_id, subdomain, template_id, content, is_published)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(subdomain.as_str())
        .bind(&template_id)
        .bind(&content_json)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                return Error::Conflict(format!(
                    "site record for tenant {} or subdomain '{}' already exists",
                    tenant_id, subdomain
                ));
            }
            map_db_error(e, "Failed to create site")
        })?;

        record_from_row(&row)
    }

    async fn upsert_content(
        &self,
        tenant_id: TenantId,
        update: ContentUpdate,
    ) -> Result<SiteRecord> {
        // Read-modify-write under a row lock so a concurrent save cannot
        // interleave; the transaction rolls back on any failure, leaving the
        // prior record intact.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error(e, "Failed to begin transaction"))?;

        let row = sqlx::query("SELECT content FROM sites WHERE tenant_id = $1 FOR UPDATE")
            .bind(tenant_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "Failed to lock site row"))?
            .ok_or(Error::NotFound)?;

        let content: serde_json::Value = row
            .try_get("content")
            .map_err(|e| Error::Database(format!("Failed to read content column: {}", e)))?;
        let mut content: SiteContent = serde_json::from_value(content)?;
        update.apply_to(&mut content);
        let content_json = serde_json::to_value(&content)?;

        let row = sqlx::query(
            r#"
            UPDATE sites
            SET content = $2, updated_at = NOW()
            WHERE tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(&content_json)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "Failed to update site content"))?;

        let record = record_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| map_db_error(e, "Failed to commit content update"))?;

        Ok(record)
    }

    async fn set_published(&self, tenant_id: TenantId, published: bool) -> Result<SiteRecord> {
        // Stamp updated_at only when the flag actually flips so repeated
        // publish calls are true no-ops.
        let row = with_retry("Failed to set publish state", || {
            sqlx::query(
                r#"
                UPDATE sites
                SET is_published = $2,
                    updated_at = CASE WHEN is_published = $2 THEN updated_at ELSE NOW() END
                WHERE tenant_id = $1
                RETURNING *
                "#,
            )
            .bind(tenant_id.as_uuid())
            .bind(published)
            .fetch_optional(&*self.pool)
        })
        .await?;

        match row {
            Some(row) => record_from_row(&row),
            None => Err(Error::NotFound),
        }
    }
}

#[async_trait]
impl BookingStore for PostgresSiteStore {
    async fn create_booking(&self, booking: Booking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                id, tenant_id, client_name, client_email, client_phone,
                service_name, appointment_date, appointment_time, status, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.tenant_id.as_uuid())
        .bind(&booking.client_name)
        .bind(&booking.client_email)
        .bind(&booking.client_phone)
        .bind(&booking.service_name)
        .bind(booking.appointment_date)
        .bind(&booking.appointment_time)
        .bind(booking.status.as_str())
        .bind(&booking.notes)
        .bind(booking.created_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create booking"))?;

        booking_from_row(&row)
    }

    async fn bookings_for(&self, tenant_id: TenantId) -> Result<Vec<Booking>> {
        let rows = with_retry("Failed to list bookings", || {
            sqlx::query(
                "SELECT * FROM bookings WHERE tenant_id = $1 ORDER BY appointment_date ASC",
            )
            .bind(tenant_id.as_uuid())
            .fetch_all(&*self.pool)
        })
        .await?;

        rows.iter().map(booking_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_upstream() {
        // Connection refused must surface as Upstream, never NotFound.
        let result = PostgresSiteStore::new("postgres://127.0.0.1:1/siteloom").await;
        match result {
            Err(Error::Upstream(_)) => {}
            other => panic!("expected Upstream error, got {:?}", other.err()),
        }
    }
}
