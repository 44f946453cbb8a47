//! Stock guard and FIFO cost engine tests
//!
//! Properties checked here:
//! - On-hand quantity equals accepted purchases minus accepted sellings
//! - On-hand quantity never goes negative, whatever the batch order
//! - FIFO cost matches unit-by-unit matching against the oldest lots
//! - Selling more than was purchased is reported, never approximated

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    compute_profit, cost_of_goods_sold, plan_batch, FifoError, LotInput, LotKind, OutcomeStatus,
    ProductBalance, PurchaseLot, SellingAggregate, StockSnapshot,
};
use std::str::FromStr;
use uuid::Uuid;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn lot_input(name: &str, quantity: i32, price: Decimal) -> LotInput {
    LotInput::new(name, i64::from(quantity), price, "2017-01-01")
}

fn purchase_lot(quantity: i32, price: Decimal, day: u32) -> PurchaseLot {
    PurchaseLot {
        id: Uuid::new_v4(),
        product_id: Uuid::nil(),
        quantity,
        price,
        purchase_date: NaiveDate::from_ymd_opt(2017, 1, day).unwrap(),
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Purchases, then a selling batch, then the report as of the sale date
    #[test]
    fn test_phone_example_through_planner_and_engine() {
        let id = Uuid::new_v4();
        let snapshot = StockSnapshot::new([ProductBalance {
            product_id: id,
            name: "phone".to_string(),
            count: 0,
        }]);

        let purchases = plan_batch(
            LotKind::Purchase,
            snapshot,
            &[
                lot_input("phone", 1, dec("1000")),
                lot_input("phone", 2, dec("2000")),
            ],
        );
        assert_eq!(purchases.balances[0].count, 3);

        let sellings = plan_batch(
            LotKind::Selling,
            StockSnapshot::new(purchases.balances.clone()),
            &[lot_input("phone", 2, dec("5000"))],
        );
        assert_eq!(sellings.balances[0].count, 1);

        let lots: Vec<PurchaseLot> = purchases
            .accepted
            .iter()
            .enumerate()
            .map(|(i, lot)| purchase_lot(lot.quantity, lot.price, i as u32 + 1))
            .collect();
        let sold = SellingAggregate {
            quantity: 2,
            revenue: dec("10000"),
        };

        let breakdown = compute_profit(&sold, &lots).unwrap();
        assert_eq!(breakdown.cost_of_goods_sold, dec("3000"));
        assert_eq!(breakdown.profit_rounded(), dec("7000.00"));
    }

    /// A rejected item never blocks the valid items next to it
    #[test]
    fn test_rejection_independence() {
        let snapshot = StockSnapshot::new([ProductBalance {
            product_id: Uuid::new_v4(),
            name: "phone".to_string(),
            count: 0,
        }]);

        let plan = plan_batch(
            LotKind::Purchase,
            snapshot,
            &[
                lot_input("phone", 1, dec("10")),
                lot_input("unknown", 1, dec("10")),
            ],
        );

        let statuses: Vec<OutcomeStatus> = plan.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![OutcomeStatus::Accepted, OutcomeStatus::ValidationError]
        );
        assert_eq!(plan.balances[0].count, 1);
    }

    #[test]
    fn test_selling_before_any_purchase_is_inconsistent() {
        let sold = SellingAggregate {
            quantity: 1,
            revenue: dec("10"),
        };
        assert_eq!(
            compute_profit(&sold, &[]),
            Err(FifoError::InconsistentLedger {
                sold: 1,
                purchased: 0
            })
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating quantities, including invalid ones
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        -2i32..=20i32
    }

    /// Strategy for generating valid unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
    }

    /// Strategy for generating one batch of (is_selling, product, quantity, price)
    fn batch_strategy() -> impl Strategy<Value = (bool, Vec<(usize, i32, Decimal)>)> {
        (
            any::<bool>(),
            prop::collection::vec((0usize..3, quantity_strategy(), price_strategy()), 1..8),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// count == accepted purchases - accepted sellings, and count >= 0
        #[test]
        fn prop_balance_invariant_holds_across_batches(
            batches in prop::collection::vec(batch_strategy(), 1..12)
        ) {
            let names = ["phone", "laptop", "ghost"];
            // "ghost" is never created
            let mut balances: Vec<ProductBalance> = names[..2]
                .iter()
                .map(|name| ProductBalance {
                    product_id: Uuid::new_v4(),
                    name: name.to_string(),
                    count: 0,
                })
                .collect();
            let mut purchased = [0i64; 2];
            let mut sold = [0i64; 2];

            for (is_selling, items) in batches {
                let kind = if is_selling { LotKind::Selling } else { LotKind::Purchase };
                let inputs: Vec<LotInput> = items
                    .iter()
                    .map(|(p, q, price)| lot_input(names[*p], *q, *price))
                    .collect();

                let plan = plan_batch(kind, StockSnapshot::new(balances.clone()), &inputs);
                prop_assert_eq!(plan.outcomes.len(), inputs.len());

                for lot in &plan.accepted {
                    let idx = names.iter().position(|n| *n == lot.product_name).unwrap();
                    prop_assert!(idx < 2);
                    match kind {
                        LotKind::Purchase => purchased[idx] += i64::from(lot.quantity),
                        LotKind::Selling => sold[idx] += i64::from(lot.quantity),
                    }
                }

                for updated in plan.balances {
                    prop_assert!(updated.count >= 0);
                    let slot = balances.iter_mut().find(|b| b.name == updated.name).unwrap();
                    *slot = updated;
                }
            }

            for (idx, balance) in balances.iter().enumerate() {
                prop_assert_eq!(i64::from(balance.count), purchased[idx] - sold[idx]);
            }
        }

        /// FIFO cost equals drawing units one at a time from the oldest lot
        #[test]
        fn prop_fifo_matches_unit_expansion(
            lots in prop::collection::vec((1i32..=10, price_strategy()), 1..10),
            sold_fraction in 0.0f64..=1.0
        ) {
            let lots: Vec<PurchaseLot> = lots
                .iter()
                .enumerate()
                .map(|(i, (q, p))| purchase_lot(*q, *p, i as u32 + 1))
                .collect();
            let total: i64 = lots.iter().map(|l| i64::from(l.quantity)).sum();
            let sold = (total as f64 * sold_fraction).floor() as i64;

            let units: Vec<Decimal> = lots
                .iter()
                .flat_map(|l| std::iter::repeat(l.price).take(l.quantity as usize))
                .collect();
            let expected: Decimal = units.iter().take(sold as usize).sum();

            prop_assert_eq!(cost_of_goods_sold(sold, &lots).unwrap(), expected);
        }

        /// Cost never decreases as more units are sold
        #[test]
        fn prop_fifo_cost_is_monotonic(
            lots in prop::collection::vec((1i32..=10, price_strategy()), 1..10),
            first in 0i64..50,
            extra in 0i64..50
        ) {
            let lots: Vec<PurchaseLot> = lots
                .iter()
                .enumerate()
                .map(|(i, (q, p))| purchase_lot(*q, *p, i as u32 + 1))
                .collect();
            let total: i64 = lots.iter().map(|l| i64::from(l.quantity)).sum();
            let a = first.min(total);
            let b = (first + extra).min(total);

            let cost_a = cost_of_goods_sold(a, &lots).unwrap();
            let cost_b = cost_of_goods_sold(b, &lots).unwrap();
            prop_assert!(cost_a <= cost_b);
        }

        /// Overselling is always an error naming both quantities
        #[test]
        fn prop_oversold_is_reported(
            lots in prop::collection::vec((1i32..=10, price_strategy()), 0..10),
            excess in 1i64..20
        ) {
            let lots: Vec<PurchaseLot> = lots
                .iter()
                .enumerate()
                .map(|(i, (q, p))| purchase_lot(*q, *p, i as u32 + 1))
                .collect();
            let total: i64 = lots.iter().map(|l| i64::from(l.quantity)).sum();

            let result = cost_of_goods_sold(total + excess, &lots);
            prop_assert_eq!(
                result,
                Err(FifoError::InconsistentLedger { sold: total + excess, purchased: total })
            );
        }

        /// Repeated computation over the same inputs gives the same profit
        #[test]
        fn prop_profit_is_deterministic(
            lots in prop::collection::vec((1i32..=10, price_strategy()), 1..10),
            revenue in price_strategy()
        ) {
            let lots: Vec<PurchaseLot> = lots
                .iter()
                .enumerate()
                .map(|(i, (q, p))| purchase_lot(*q, *p, i as u32 + 1))
                .collect();
            let sold = SellingAggregate { quantity: i64::from(lots[0].quantity), revenue };

            let first = compute_profit(&sold, &lots).unwrap();
            let second = compute_profit(&sold, &lots).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
