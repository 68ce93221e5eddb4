//! Naive NVT-based price estimate over the most recent joined records.

use crate::error::PredictError;
use crate::series::JoinedRecord;
use serde::{Deserialize, Serialize};

/// Number of trailing records the estimate averages over.
pub const WINDOW: usize = 10;

/// Body of a successful `/predict/{token}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub token: String,
    pub predicted_nvt_ratio: f64,
    pub predicted_price: f64,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}

/// Estimate the price from the last [`WINDOW`] records, or all of them if
/// fewer are available.
pub fn estimate(token: &str, records: &[JoinedRecord]) -> Result<Prediction, PredictError> {
    if records.is_empty() {
        return Err(PredictError::InsufficientData);
    }
    let recent = &records[records.len().saturating_sub(WINDOW)..];

    let mean_ratio = mean(recent.iter().map(|r| r.nvt_ratio));
    if !mean_ratio.is_finite() {
        return Err(PredictError::NonFiniteRatio {
            window: recent.len(),
        });
    }
    let mean_price = mean(recent.iter().map(|r| r.price));

    let predicted_price = if mean_ratio != 0.0 {
        mean_price / mean_ratio
    } else {
        mean_price
    };
    // Infinity and NaN have no JSON form.
    if !predicted_price.is_finite() {
        return Err(PredictError::NonFinitePrice {
            window: recent.len(),
        });
    }

    Ok(Prediction {
        token: token.to_string(),
        predicted_nvt_ratio: mean_ratio,
        predicted_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::nvt_ratio;
    use chrono::DateTime;

    fn record(ts: i64, price: f64, cap: f64, volume: f64) -> JoinedRecord {
        JoinedRecord {
            at: DateTime::from_timestamp_millis(ts).unwrap(),
            price,
            market_cap: cap,
            transaction_volume: volume,
            nvt_ratio: nvt_ratio(cap, volume),
        }
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn averages_last_ten_records() {
        let records: Vec<JoinedRecord> = (1..=12)
            .map(|i| {
                let i = i as f64;
                record(i as i64 * 60_000, 100.0 + i, 1_000.0 * i, 10.0 + i)
            })
            .collect();

        let expected_ratio = (3..=12)
            .map(|i| (1_000.0 * i as f64) / (10.0 + i as f64))
            .sum::<f64>()
            / 10.0;
        let expected_price =
            (3..=12).map(|i| 100.0 + i as f64).sum::<f64>() / 10.0 / expected_ratio;

        let p = estimate("eth", &records).unwrap();
        assert_eq!(p.token, "eth");
        assert!(approx_eq(p.predicted_nvt_ratio, expected_ratio), "{p:?}");
        assert!(approx_eq(p.predicted_price, expected_price), "{p:?}");
    }

    #[test]
    fn short_series_uses_all_records() {
        let records = vec![record(1, 10.0, 100.0, 10.0), record(2, 20.0, 300.0, 10.0)];
        let p = estimate("BTC", &records).unwrap();
        assert!(approx_eq(p.predicted_nvt_ratio, 20.0));
        assert!(approx_eq(p.predicted_price, 15.0 / 20.0));
    }

    #[test]
    fn empty_series_is_insufficient_data() {
        assert!(matches!(
            estimate("BTC", &[]),
            Err(PredictError::InsufficientData)
        ));
    }

    #[test]
    fn zero_mean_ratio_falls_back_to_mean_price() {
        let records = vec![record(1, 10.0, 0.0, 5.0), record(2, 30.0, 0.0, 7.0)];
        let p = estimate("SOL", &records).unwrap();
        assert_eq!(p.predicted_nvt_ratio, 0.0);
        assert_eq!(p.predicted_price, 20.0);
    }

    #[test]
    fn zero_volume_in_window_is_rejected() {
        let mut records: Vec<JoinedRecord> =
            (0..12).map(|i| record(i, 10.0, 100.0, 10.0)).collect();
        records[11] = record(11, 10.0, 100.0, 0.0);

        match estimate("ARB", &records) {
            Err(PredictError::NonFiniteRatio { window }) => assert_eq!(window, WINDOW),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_volume_outside_window_is_ignored() {
        let mut records: Vec<JoinedRecord> =
            (0..12).map(|i| record(i, 10.0, 100.0, 10.0)).collect();
        records[0] = record(0, 10.0, 100.0, 0.0);

        let p = estimate("ARB", &records).unwrap();
        assert_eq!(p.predicted_nvt_ratio, 10.0);
        assert_eq!(p.predicted_price, 1.0);
    }

    #[test]
    fn overflowing_price_window_is_rejected() {
        let records = vec![record(1, 1e308, 1.0, 1.0), record(2, 1e308, 1.0, 1.0)];
        match estimate("BTC", &records) {
            Err(PredictError::NonFinitePrice { window }) => assert_eq!(window, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn subnormal_ratio_that_overflows_price_is_rejected() {
        let records = vec![record(1, 100.0, 1e-310, 1.0)];
        assert!(matches!(
            estimate("BTC", &records),
            Err(PredictError::NonFinitePrice { window: 1 })
        ));
    }

    #[test]
    fn overflowing_ratio_sum_is_rejected() {
        let records = vec![record(1, 10.0, f64::MAX, 1.0), record(2, 10.0, f64::MAX, 1.0)];
        assert!(matches!(
            estimate("ETH", &records),
            Err(PredictError::NonFiniteRatio { window: 2 })
        ));
    }

    #[test]
    fn prediction_survives_json() {
        let p = Prediction {
            token: "bnb".into(),
            predicted_nvt_ratio: 12.345678901234,
            predicted_price: 0.000123456789,
        };
        let back: Prediction = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(back.token, p.token);
        assert!(approx_eq(back.predicted_nvt_ratio, p.predicted_nvt_ratio));
        assert!(approx_eq(back.predicted_price, p.predicted_price));
    }
}
