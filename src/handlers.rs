//! HTTP request handlers.

use crate::coingecko::{MarketChart, MarketDataSource};
use crate::error::PredictError;
use crate::estimator::{estimate, Prediction};
use crate::series::join;
use crate::token::Token;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::{debug, info};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketDataSource>,
}

impl AppState {
    pub fn new(source: impl MarketDataSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Join the fetched chart and estimate. `token` is echoed back unchanged.
pub fn predict_from_chart(token: &str, chart: &MarketChart) -> Result<Prediction, PredictError> {
    let records = join(chart)?;
    debug!(
        prices = chart.prices.len(),
        joined = records.len(),
        "joined market chart"
    );
    estimate(token, &records)
}

/// GET /predict/{token} - NVT based price estimate.
pub async fn predict(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Prediction>, PredictError> {
    let parsed: Token = token.parse()?;
    let chart = state.source.market_chart(parsed).await?;
    let prediction = predict_from_chart(&token, &chart)?;

    info!(
        token = %parsed,
        nvt = prediction.predicted_nvt_ratio,
        price = prediction.predicted_price,
        "prediction"
    );
    Ok(Json(prediction))
}
