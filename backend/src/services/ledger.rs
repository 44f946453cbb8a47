//! Ledger service: purchase and selling batches, and the date-filtered reads
//! the profit report is built from.
//!
//! Every batch runs in one transaction that locks the referenced product rows
//! before reading their balances. Two batches touching the same product are
//! therefore serialized, and a balance check can never race a balance update.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{
    plan_batch, BatchResponse, LotInput, LotKind, PlannedLot, ProductBalance, PurchaseLot,
    SellingAggregate, StockSnapshot,
};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Ledger service for recording lots under the stock guard
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
    max_batch_size: usize,
}

/// Row for the locked balance query
#[derive(Debug, FromRow)]
struct BalanceRow {
    id: Uuid,
    name: String,
    count: i32,
}

impl From<BalanceRow> for ProductBalance {
    fn from(row: BalanceRow) -> Self {
        ProductBalance {
            product_id: row.id,
            name: row.name,
            count: row.count,
        }
    }
}

/// Row for purchase lot queries
#[derive(Debug, FromRow)]
struct PurchaseRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    price: Decimal,
    purchase_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<PurchaseRow> for PurchaseLot {
    fn from(row: PurchaseRow) -> Self {
        PurchaseLot {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            price: row.price,
            purchase_date: row.purchase_date,
            created_at: row.created_at,
        }
    }
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool, max_batch_size: usize) -> Self {
        Self { db, max_batch_size }
    }

    /// Record a batch of purchases
    pub async fn record_purchases(&self, items: Vec<LotInput>) -> AppResult<BatchResponse> {
        self.record_batch(LotKind::Purchase, items).await
    }

    /// Record a batch of sellings
    pub async fn record_sellings(&self, items: Vec<LotInput>) -> AppResult<BatchResponse> {
        self.record_batch(LotKind::Selling, items).await
    }

    async fn record_batch(&self, kind: LotKind, items: Vec<LotInput>) -> AppResult<BatchResponse> {
        if items.is_empty() {
            return Err(AppError::Validation {
                field: kind.batch_field().to_string(),
                message: "No lots specified".to_string(),
            });
        }
        if items.len() > self.max_batch_size {
            return Err(AppError::Validation {
                field: kind.batch_field().to_string(),
                message: format!(
                    "Batch of {} lots exceeds the limit of {}",
                    items.len(),
                    self.max_batch_size
                ),
            });
        }

        let mut names: Vec<String> = items.iter().map(|item| item.product_name.clone()).collect();
        names.sort_unstable();
        names.dedup();

        // Dropping the transaction on any early return rolls it back
        let mut tx = self.db.begin().await?;

        let snapshot = lock_balances(&mut tx, &names).await?;
        let plan = plan_batch(kind, snapshot, &items);

        for lot in &plan.accepted {
            insert_lot(&mut tx, kind, lot).await?;
        }

        for balance in &plan.balances {
            sqlx::query("UPDATE products SET count = $1, updated_at = NOW() WHERE id = $2")
                .bind(balance.count)
                .bind(balance.product_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        for outcome in plan.outcomes.iter().filter(|o| !o.is_accepted()) {
            tracing::warn!(kind = kind.as_str(), product = %outcome.product_name, "{}", outcome.message);
        }
        tracing::info!(
            kind = kind.as_str(),
            accepted = plan.accepted_count(),
            rejected = plan.rejected_count(),
            "Batch committed"
        );

        Ok(BatchResponse::from(plan.outcomes))
    }
}

/// Lock the named products and read their balances.
///
/// Rows are locked in id order so concurrent batches cannot deadlock.
/// Names with no product are simply absent from the snapshot.
async fn lock_balances(
    tx: &mut Transaction<'_, Postgres>,
    names: &[String],
) -> Result<StockSnapshot, sqlx::Error> {
    let rows = sqlx::query_as::<_, BalanceRow>(
        r#"
        SELECT id, name, count
        FROM products
        WHERE name = ANY($1)
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(names)
    .fetch_all(&mut **tx)
    .await?;

    Ok(StockSnapshot::new(rows.into_iter().map(ProductBalance::from)))
}

async fn insert_lot(
    tx: &mut Transaction<'_, Postgres>,
    kind: LotKind,
    lot: &PlannedLot,
) -> Result<(), sqlx::Error> {
    let sql = match kind {
        LotKind::Purchase => {
            "INSERT INTO purchases (product_id, quantity, price, purchase_date) VALUES ($1, $2, $3, $4)"
        }
        LotKind::Selling => {
            "INSERT INTO sellings (product_id, quantity, price, selling_date) VALUES ($1, $2, $3, $4)"
        }
    };

    sqlx::query(sql)
        .bind(lot.product_id)
        .bind(lot.quantity)
        .bind(lot.price)
        .bind(lot.date)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Check whether a product exists
pub async fn product_exists(conn: &mut PgConnection, product_name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE name = $1)")
        .bind(product_name)
        .fetch_one(conn)
        .await
}

/// Purchase lots of a product dated on or before the cutoff, oldest first.
///
/// Lots sharing a date keep their insertion order.
pub async fn purchases_up_to(
    conn: &mut PgConnection,
    product_name: &str,
    cutoff: NaiveDate,
) -> Result<Vec<PurchaseLot>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PurchaseRow>(
        r#"
        SELECT pu.id, pu.product_id, pu.quantity, pu.price, pu.purchase_date, pu.created_at
        FROM purchases pu
        JOIN products p ON p.id = pu.product_id
        WHERE p.name = $1 AND pu.purchase_date <= $2
        ORDER BY pu.purchase_date ASC, pu.seq ASC
        "#,
    )
    .bind(product_name)
    .bind(cutoff)
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(PurchaseLot::from).collect())
}

/// Total quantity and revenue of the sellings of a product up to the cutoff
pub async fn selling_aggregate_up_to(
    conn: &mut PgConnection,
    product_name: &str,
    cutoff: NaiveDate,
) -> Result<SellingAggregate, sqlx::Error> {
    let (quantity, revenue) = sqlx::query_as::<_, (i64, Decimal)>(
        r#"
        SELECT COALESCE(SUM(s.quantity), 0)::BIGINT,
               COALESCE(SUM(s.quantity * s.price), 0)::NUMERIC
        FROM sellings s
        JOIN products p ON p.id = s.product_id
        WHERE p.name = $1 AND s.selling_date <= $2
        "#,
    )
    .bind(product_name)
    .bind(cutoff)
    .fetch_one(conn)
    .await?;

    Ok(SellingAggregate { quantity, revenue })
}
