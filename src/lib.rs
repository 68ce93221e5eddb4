//! NVT price predictor.
//!
//! Fetches a day of minute-level market data for a token from CoinGecko,
//! joins price, market cap and volume on timestamp and estimates a price from
//! the mean network-value-to-transactions ratio of the most recent records.

pub mod coingecko;
pub mod config;
pub mod error;
pub mod estimator;
pub mod handlers;
pub mod logging;
pub mod series;
pub mod server;
pub mod token;

pub use coingecko::{CoingeckoClient, MarketChart, MarketDataSource, SeriesPoint};
pub use config::Config;
pub use error::PredictError;
pub use estimator::Prediction;
pub use handlers::AppState;
pub use token::Token;
