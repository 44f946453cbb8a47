//! Profit report service

use chrono::NaiveDate;
use shared::{compute_profit, ProfitReport};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::ledger::{product_exists, purchases_up_to, selling_aggregate_up_to};

/// Report service computing FIFO profit as of a date
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Profit of a product as of `report_date` (inclusive).
    ///
    /// All reads share one repeatable-read snapshot, so a batch committing
    /// meanwhile is either fully visible or not at all.
    pub async fn profit_report(
        &self,
        product_name: &str,
        report_date: NaiveDate,
    ) -> AppResult<ProfitReport> {
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        if !product_exists(&mut *tx, product_name).await? {
            return Err(AppError::NotFound(format!("Product [{}]", product_name)));
        }

        let sold = selling_aggregate_up_to(&mut *tx, product_name, report_date).await?;
        let lots = purchases_up_to(&mut *tx, product_name, report_date).await?;
        tx.commit().await?;

        tracing::debug!(
            product = product_name,
            %report_date,
            sold = sold.quantity,
            lots = lots.len(),
            "Computing FIFO profit"
        );

        let breakdown = compute_profit(&sold, &lots)?;
        let profit_rounded = breakdown.profit_rounded();

        Ok(ProfitReport {
            product_name: product_name.to_string(),
            report_date,
            sold_quantity: breakdown.sold_quantity,
            revenue: breakdown.revenue,
            cost_of_goods_sold: breakdown.cost_of_goods_sold,
            profit: breakdown.profit,
            profit_rounded,
            message: format!("Income on {}: [{:.2}]", report_date, profit_rounded),
        })
    }
}
