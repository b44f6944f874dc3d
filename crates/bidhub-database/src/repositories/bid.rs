//! Bid repository implementation.
//!
//! The admission write is transactional: the bid row and the auction's
//! price/status update commit together or not at all. The admission
//! engine has already serialized access per auction, so the transaction
//! here is purely about atomicity, not ordering.

use async_trait::async_trait;
use sqlx::PgPool;

use bidhub_core::error::{AppError, ErrorKind};
use bidhub_core::result::AppResult;
use bidhub_core::types::id::{AuctionId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::auction::AuctionStatus;
use bidhub_entity::bid::Bid;
use bidhub_entity::store::BidStore;

/// Repository for append-only bid storage.
#[derive(Debug, Clone)]
pub struct BidRepository {
    pool: PgPool,
}

impl BidRepository {
    /// Create a new bid repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BidStore for BidRepository {
    async fn admit(&self, bid: &Bid, new_status: AuctionStatus) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin bid transaction", e)
        })?;

        sqlx::query(
            "INSERT INTO bids (id, auction_id, bidder_id, amount, placed_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(bid.id)
        .bind(bid.auction_id)
        .bind(bid.bidder_id)
        .bind(bid.amount)
        .bind(bid.placed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert bid", e))?;

        sqlx::query("UPDATE auctions SET current_price = $2, status = $3 WHERE id = $1")
            .bind(bid.auction_id)
            .bind(bid.amount)
            .bind(new_status)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update auction price", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit bid transaction", e)
        })?;

        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Bid>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bids")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bids", e))?;

        let bids = sqlx::query_as::<_, Bid>(
            "SELECT * FROM bids ORDER BY placed_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bids", e))?;

        Ok(PageResponse::new(
            bids,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn bidder_ids(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT DISTINCT bidder_id FROM bids WHERE auction_id = $1")
            .bind(auction_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bidders", e))
    }
}
