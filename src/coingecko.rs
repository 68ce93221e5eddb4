//! CoinGecko market chart fetcher.

use crate::error::PredictError;
use crate::token::Token;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3/";
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// One `[timestamp_ms, value]` pair as CoinGecko encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint(pub i64, pub f64);

/// Body of `/coins/{id}/market_chart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<SeriesPoint>,
    pub market_caps: Vec<SeriesPoint>,
    pub total_volumes: Vec<SeriesPoint>,
}

/// Source of the trailing 24h market chart for a token.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn market_chart(&self, token: Token) -> Result<MarketChart, PredictError>;
}

/// CoinGecko-backed market data source.
#[derive(Debug, Clone)]
pub struct CoingeckoClient {
    client: Client,
    base: Url,
    api_key: Option<String>,
}

impl CoingeckoClient {
    /// `base` must end with `/` so relative paths are appended to it.
    pub fn new(base: Url, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base,
            api_key,
        }
    }

    /// Build `coins/{id}/market_chart` for the last day at minute resolution.
    pub fn market_chart_url(&self, token: Token) -> Result<Url, PredictError> {
        let mut url = self
            .base
            .join(&format!("coins/{}/market_chart", token.coingecko_id()))
            .map_err(|e| PredictError::Decode(format!("invalid market chart url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("days", "1")
            .append_pair("interval", "minute");
        Ok(url)
    }
}

#[async_trait]
impl MarketDataSource for CoingeckoClient {
    async fn market_chart(&self, token: Token) -> Result<MarketChart, PredictError> {
        let url = self.market_chart_url(token)?;
        debug!(id = token.coingecko_id(), "coingecko: fetching market chart");

        let mut req = self.client.get(url).header("accept", "application/json");
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await.inspect_err(|e| {
            warn!("coingecko: request failed: {e}");
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_else(|e| {
                warn!("coingecko: read error body failed: {e}");
                String::new()
            });
            warn!(status = status.as_u16(), "coingecko: non-success status");
            return Err(PredictError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("coingecko: parse JSON failed: {e}");
            PredictError::Decode(e.to_string())
        })
    }
}
