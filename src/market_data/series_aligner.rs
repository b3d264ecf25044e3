use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::FUTURE_PRICE_TOLERANCE_DAYS;

use super::market_data_model::PricePoint;

/// Builds a common date axis as the union of all dates observed across the
/// given series that fall within `[start_date, end_date]`, sorted ascending.
pub fn build_date_axis(
    series_by_symbol: &HashMap<String, Vec<PricePoint>>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: HashSet<NaiveDate> = HashSet::new();
    for series in series_by_symbol.values() {
        for point in series {
            if point.date >= start_date && point.date <= end_date {
                dates.insert(point.date);
            }
        }
    }
    let mut axis: Vec<NaiveDate> = dates.into_iter().collect();
    axis.sort();
    axis
}

/// Resolves a price for `target_date` from an ascending series.
///
/// Exact match wins; otherwise the closest strictly-earlier price is carried
/// forward. When no earlier quote exists (window starts before the asset's
/// first listing) the first quote after the target is accepted within
/// `FUTURE_PRICE_TOLERANCE_DAYS`. `None` means the symbol has no usable
/// price on that date; callers treat it as a data gap, not a failure.
pub fn resolve_price(series: &[PricePoint], target_date: NaiveDate) -> Option<Decimal> {
    if series.is_empty() {
        return None;
    }

    match series.binary_search_by(|point| point.date.cmp(&target_date)) {
        Ok(index) => Some(series[index].price),
        Err(index) => {
            if index > 0 {
                // Last known value before the target.
                return Some(series[index - 1].price);
            }

            let first = &series[0];
            let gap_days = (first.date - target_date).num_days();
            if gap_days <= FUTURE_PRICE_TOLERANCE_DAYS {
                debug!(
                    "No quote on or before {}; using future quote from {} ({} days ahead)",
                    target_date, first.date, gap_days
                );
                Some(first.price)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(y: i32, m: u32, d: u32, price: Decimal) -> PricePoint {
        PricePoint {
            date: date(y, m, d),
            price,
        }
    }

    #[test]
    fn test_axis_is_union_of_dates_within_window() {
        let mut series_by_symbol = HashMap::new();
        series_by_symbol.insert(
            "AAPL".to_string(),
            vec![
                point(2024, 1, 2, dec!(100)),
                point(2024, 1, 4, dec!(101)),
                point(2024, 2, 1, dec!(105)), // outside window
            ],
        );
        series_by_symbol.insert(
            "7203.T".to_string(),
            vec![point(2024, 1, 3, dec!(2500)), point(2024, 1, 4, dec!(2510))],
        );

        let axis = build_date_axis(&series_by_symbol, date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(
            axis,
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]
        );
    }

    #[test]
    fn test_resolve_exact_match() {
        let series = vec![point(2024, 1, 2, dec!(100)), point(2024, 1, 3, dec!(110))];
        assert_eq!(resolve_price(&series, date(2024, 1, 3)), Some(dec!(110)));
    }

    #[test]
    fn test_resolve_forward_fills_from_last_known() {
        let series = vec![point(2024, 1, 2, dec!(100)), point(2024, 1, 8, dec!(110))];
        // Weekend gap: the Friday price carries forward.
        assert_eq!(resolve_price(&series, date(2024, 1, 5)), Some(dec!(100)));
        // After the last point the final price carries forward too.
        assert_eq!(resolve_price(&series, date(2024, 3, 1)), Some(dec!(110)));
    }

    #[test]
    fn test_resolve_tolerates_near_future_quote() {
        // Series starts after the target (newly listed asset).
        let series = vec![point(2024, 1, 20, dec!(50))];
        assert_eq!(resolve_price(&series, date(2024, 1, 2)), Some(dec!(50)));
    }

    #[test]
    fn test_resolve_rejects_far_future_quote() {
        let series = vec![point(2024, 3, 20, dec!(50))];
        assert_eq!(resolve_price(&series, date(2024, 1, 2)), None);
    }

    #[test]
    fn test_resolve_empty_series() {
        assert_eq!(resolve_price(&[], date(2024, 1, 2)), None);
    }
}
