//! SQLite persistence for the gift registry.
//!
//! Owns the two pieces of logic worth getting right: sheet reconciliation
//! (insert-or-skip keyed on the unique name) and the claim transition (a
//! single conditional UPDATE whose row count decides the winner).

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use super::model::{ClaimOutcome, GiftItem, UnclaimOutcome, CLAIMED_SENTINEL};
use crate::sheet::SheetRow;

/// A store-level fault. Expected outcomes (already claimed, not found,
/// duplicate sheet name) are values, never errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows newly inserted this pass.
    pub inserted: u64,
    /// Rows whose name already existed — left entirely untouched.
    pub skipped: u64,
}

/// Data-access layer for the `presentes` table.
///
/// Shares the service's main SQLite pool — no separate connection needed.
#[derive(Clone)]
pub struct RegistryStore {
    pool: SqlitePool,
}

impl RegistryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ─── Sync ─────────────────────────────────────────────────────────────

    /// Reconcile sheet rows into the store, in sheet order.
    ///
    /// First write wins: a row whose name already exists is skipped whole —
    /// links, colors, and claim state of the stored item are never touched
    /// by a re-import. The conflict is detected as a value (`rows_affected`
    /// of the `ON CONFLICT DO NOTHING` insert), not as a caught error.
    ///
    /// Any other store failure aborts the remaining rows; rows already
    /// inserted in this pass stay committed.
    pub async fn sync(&self, rows: &[SheetRow]) -> Result<SyncReport, RegistryError> {
        let mut report = SyncReport::default();

        for row in rows {
            let now = Utc::now().to_rfc3339();
            let result = sqlx::query(
                "INSERT INTO presentes (presente, link1, link2, cores, escolhido_por, criado_em) \
                 VALUES (?, ?, ?, ?, NULL, ?) \
                 ON CONFLICT(presente) DO NOTHING",
            )
            .bind(&row.presente)
            .bind(&row.sugestao1)
            .bind(&row.sugestao2)
            .bind(&row.cores)
            .bind(&now)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() > 0 {
                report.inserted += 1;
            } else {
                debug!(gift = %row.presente, "sheet row already present — skipped");
                report.skipped += 1;
            }
        }

        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "sheet sync complete"
        );
        Ok(report)
    }

    // ─── Claim / unclaim ──────────────────────────────────────────────────

    /// Attempt to claim an item.
    ///
    /// The conditional update is the sole arbiter: it only matches while
    /// `escolhido_por` is NULL, so of any number of concurrent attempts
    /// exactly one affects a row. The name is read back afterwards purely
    /// for display and notification — never to decide the outcome.
    pub async fn claim(&self, id: i64) -> Result<ClaimOutcome, RegistryError> {
        let result = sqlx::query(
            "UPDATE presentes SET escolhido_por = ? \
             WHERE id = ? AND escolhido_por IS NULL",
        )
        .bind(CLAIMED_SENTINEL)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            let (name,): (String,) = sqlx::query_as("SELECT presente FROM presentes WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            info!(gift = %name, id, "gift claimed");
            return Ok(ClaimOutcome::Claimed { name });
        }

        // Zero rows: either the item is already claimed or the id is unknown.
        match self.exists(id).await? {
            true => Ok(ClaimOutcome::AlreadyClaimed),
            false => Ok(ClaimOutcome::NotFound),
        }
    }

    /// Release an item's claim (admin operation).
    ///
    /// Unconditional and idempotent: clearing an already-unclaimed item is a
    /// success, indistinguishable from clearing a claimed one.
    pub async fn unclaim(&self, id: i64) -> Result<UnclaimOutcome, RegistryError> {
        if !self.exists(id).await? {
            return Ok(UnclaimOutcome::NotFound);
        }

        sqlx::query("UPDATE presentes SET escolhido_por = NULL WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!(id, "gift claim released");
        Ok(UnclaimOutcome::Cleared)
    }

    // ─── Read ─────────────────────────────────────────────────────────────

    /// All items, in insertion order.
    pub async fn list(&self) -> Result<Vec<GiftItem>, RegistryError> {
        let rows = sqlx::query_as::<_, GiftItem>(
            "SELECT id, presente, link1, link2, cores, escolhido_por, criado_em \
             FROM presentes ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch a single item by id. Returns `None` if unknown.
    pub async fn get(&self, id: i64) -> Result<Option<GiftItem>, RegistryError> {
        let row = sqlx::query_as::<_, GiftItem>(
            "SELECT id, presente, link1, link2, cores, escolhido_por, criado_em \
             FROM presentes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn exists(&self, id: i64) -> Result<bool, RegistryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM presentes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
