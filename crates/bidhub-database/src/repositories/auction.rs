//! Auction repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bidhub_core::error::{AppError, ErrorKind};
use bidhub_core::result::AppResult;
use bidhub_core::types::id::AuctionId;
use bidhub_entity::auction::{Auction, AuctionStatus};
use bidhub_entity::store::AuctionStore;

/// Repository for auction price/status state.
#[derive(Debug, Clone)]
pub struct AuctionRepository {
    pool: PgPool,
}

impl AuctionRepository {
    /// Create a new auction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for AuctionRepository {
    async fn find(&self, id: AuctionId) -> AppResult<Option<Auction>> {
        sqlx::query_as::<_, Auction>("SELECT * FROM auctions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load auction", e))
    }

    async fn set_status(
        &self,
        id: AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE auctions SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update auction status", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Auction {id} is no longer in status {from}"
            )));
        }
        Ok(())
    }
}
