//! Errors raised while producing a prediction and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Everything that can stop `/predict/{token}` from returning an estimate.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The symbol is not in the allow-list.
    #[error("Unsupported token")]
    UnsupportedToken,

    /// CoinGecko answered with a non-200 status.
    #[error("Failed to retrieve data from the API: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Failed to reach the market data API: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body is not a usable market chart.
    #[error("Malformed market data: {0}")]
    Decode(String),

    #[error("Insufficient data: no overlapping market data points")]
    InsufficientData,

    #[error("NVT ratio is not finite over the last {window} records")]
    NonFiniteRatio { window: usize },

    #[error("Predicted price is not finite over the last {window} records")]
    NonFinitePrice { window: usize },
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::UnsupportedToken => StatusCode::BAD_REQUEST,
            PredictError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            PredictError::Transport(_) | PredictError::Decode(_) => StatusCode::BAD_GATEWAY,
            PredictError::InsufficientData
            | PredictError::NonFiniteRatio { .. }
            | PredictError::NonFinitePrice { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every non-200 response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
