//! Price aggregation over a product's recorded history.
//!
//! Pure and synchronous; safe to call concurrently across products.

use crate::error::AppError;
use crate::models::PricePoint;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors from price aggregation
#[derive(Error, Debug)]
pub enum PricingError {
    /// The caller must append the new price before aggregating
    #[error("price history is empty")]
    EmptyHistory,
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Aggregate statistics over a price history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceStats {
    pub lowest: Decimal,
    pub highest: Decimal,
    pub average: Decimal,
}

/// Compute lowest/highest/average over a non-empty price history.
///
/// The average is rounded half-up to 2 decimal places. Decimal
/// arithmetic keeps the result independent of summation order.
pub fn compute_price_stats(history: &[PricePoint]) -> Result<PriceStats, PricingError> {
    let first = history.first().ok_or(PricingError::EmptyHistory)?;

    let mut lowest = first.price;
    let mut highest = first.price;
    let mut sum = Decimal::ZERO;

    for point in history {
        if point.price < lowest {
            lowest = point.price;
        }
        if point.price > highest {
            highest = point.price;
        }
        sum += point.price;
    }

    let count = Decimal::from(history.len() as u64);
    let average = (sum / count).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PriceStats {
        lowest,
        highest,
        average,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(prices: &[i64]) -> Vec<PricePoint> {
        prices
            .iter()
            .map(|p| PricePoint::new(Decimal::new(*p, 0)))
            .collect()
    }

    #[test]
    fn test_empty_history_is_invalid() {
        let result = compute_price_stats(&[]);
        assert!(matches!(result, Err(PricingError::EmptyHistory)));
    }

    #[test]
    fn test_single_point_stats() {
        let stats = compute_price_stats(&history(&[10])).unwrap();
        assert_eq!(stats.lowest, Decimal::new(10, 0));
        assert_eq!(stats.highest, Decimal::new(10, 0));
        assert_eq!(stats.average, Decimal::new(10, 0));
    }

    #[test]
    fn test_three_point_stats() {
        let stats = compute_price_stats(&history(&[10, 20, 30])).unwrap();
        assert_eq!(stats.lowest, Decimal::new(10, 0));
        assert_eq!(stats.highest, Decimal::new(30, 0));
        assert_eq!(stats.average, Decimal::new(20, 0));
    }

    #[test]
    fn test_average_rounds_half_up() {
        // (10 + 10 + 11) / 3 = 10.333... -> 10.33
        let stats = compute_price_stats(&history(&[10, 10, 11])).unwrap();
        assert_eq!(stats.average, Decimal::new(1033, 2));

        // (10.00 + 10.01) / 2 = 10.005, midpoint rounds up -> 10.01
        let points = vec![
            PricePoint::new(Decimal::new(1000, 2)),
            PricePoint::new(Decimal::new(1001, 2)),
        ];
        let stats = compute_price_stats(&points).unwrap();
        assert_eq!(stats.average, Decimal::new(1001, 2));
    }

    #[test]
    fn test_lowest_le_average_le_highest() {
        for prices in [&[5, 5, 5][..], &[1, 100, 50][..], &[7, 3, 9, 3][..]] {
            let stats = compute_price_stats(&history(prices)).unwrap();
            assert!(stats.lowest <= stats.average);
            assert!(stats.average <= stats.highest);
        }
    }

    #[test]
    fn test_order_independent() {
        let a = compute_price_stats(&history(&[10, 20, 30])).unwrap();
        let b = compute_price_stats(&history(&[30, 10, 20])).unwrap();
        assert_eq!(a, b);
    }
}
