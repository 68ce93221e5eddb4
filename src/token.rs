use crate::error::PredictError;
use std::fmt;
use std::str::FromStr;

/// Tokens the predictor knows how to look up on CoinGecko.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Eth,
    Bnb,
    Arb,
    Btc,
    Sol,
}

impl Token {
    /// Map a ticker symbol (any case) to a supported token.
    pub fn from_symbol(sym: &str) -> Option<Token> {
        match sym.to_ascii_uppercase().as_str() {
            "ETH" => Some(Token::Eth),
            "BNB" => Some(Token::Bnb),
            "ARB" => Some(Token::Arb),
            "BTC" => Some(Token::Btc),
            "SOL" => Some(Token::Sol),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Token::Eth => "ETH",
            Token::Bnb => "BNB",
            Token::Arb => "ARB",
            Token::Btc => "BTC",
            Token::Sol => "SOL",
        }
    }

    /// CoinGecko's asset id for this token.
    pub fn coingecko_id(self) -> &'static str {
        match self {
            Token::Eth => "ethereum",
            Token::Bnb => "binancecoin",
            Token::Arb => "arbitrum",
            Token::Btc => "bitcoin",
            Token::Sol => "solana",
        }
    }
}

impl FromStr for Token {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::from_symbol(s).ok_or(PredictError::UnsupportedToken)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
