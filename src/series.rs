//! Inner join of the price, market cap and volume series.

use crate::coingecko::{MarketChart, SeriesPoint};
use crate::error::PredictError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One timestamp present in all three series.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub at: DateTime<Utc>,
    pub price: f64,
    pub market_cap: f64,
    pub transaction_volume: f64,
    pub nvt_ratio: f64,
}

/// Network value to transactions. Only an exact zero volume yields `+inf`.
pub fn nvt_ratio(market_cap: f64, transaction_volume: f64) -> f64 {
    if transaction_volume == 0.0 {
        f64::INFINITY
    } else {
        market_cap / transaction_volume
    }
}

fn to_datetime(ts_ms: i64) -> Result<DateTime<Utc>, PredictError> {
    DateTime::from_timestamp_millis(ts_ms)
        .ok_or_else(|| PredictError::Decode(format!("timestamp out of range: {ts_ms}")))
}

fn index_by_time(points: &[SeriesPoint]) -> Result<HashMap<DateTime<Utc>, Vec<f64>>, PredictError> {
    let mut index: HashMap<DateTime<Utc>, Vec<f64>> = HashMap::with_capacity(points.len());
    for &SeriesPoint(ts, value) in points {
        index.entry(to_datetime(ts)?).or_default().push(value);
    }
    Ok(index)
}

/// Join the three series on exact timestamp equality.
///
/// Rows follow the order of `chart.prices`. A timestamp repeated in several
/// series yields one row per matching combination, like a relational join.
pub fn join(chart: &MarketChart) -> Result<Vec<JoinedRecord>, PredictError> {
    let caps = index_by_time(&chart.market_caps)?;
    let volumes = index_by_time(&chart.total_volumes)?;

    let mut rows = Vec::with_capacity(chart.prices.len());
    for &SeriesPoint(ts, price) in &chart.prices {
        let at = to_datetime(ts)?;
        let (Some(cap_values), Some(volume_values)) = (caps.get(&at), volumes.get(&at)) else {
            continue;
        };
        for &market_cap in cap_values {
            for &transaction_volume in volume_values {
                rows.push(JoinedRecord {
                    at,
                    price,
                    market_cap,
                    transaction_volume,
                    nvt_ratio: nvt_ratio(market_cap, transaction_volume),
                });
            }
        }
    }
    Ok(rows)
}
