//! Server configuration.

use crate::coingecko::DEFAULT_BASE_URL;
use anyhow::Context;
use clap::Parser;
use reqwest::Url;
use std::net::SocketAddr;

/// NVT price predictor
///
/// Serves `GET /predict/{token}` backed by CoinGecko market charts.
#[derive(Parser, Debug)]
#[command(name = "nvt-predictor", version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(short, long, env = "NVT_LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// CoinGecko demo API key, sent as `x-cg-demo-api-key`
    #[arg(long = "api-key", env = "COINGECKO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// CoinGecko API base URL
    #[arg(long = "coingecko-base-url", env = "COINGECKO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub coingecko_base_url: String,
}

/// Validated runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_key: Option<String>,
    pub coingecko_base: Url,
}

impl Config {
    /// Load `.env`, then parse CLI arguments with environment fallbacks.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let mut base = args.coingecko_base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let coingecko_base = Url::parse(&base)
            .with_context(|| format!("invalid CoinGecko base URL: {base}"))?;

        Ok(Self {
            bind_addr: args.listen,
            api_key: args.api_key.filter(|s| !s.trim().is_empty()),
            coingecko_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> anyhow::Result<Config> {
        let argv = std::iter::once("nvt-predictor").chain(extra.iter().copied());
        Config::from_args(Args::try_parse_from(argv)?)
    }

    #[test]
    fn explicit_flags_are_used() {
        let cfg = parse(&[
            "--listen",
            "127.0.0.1:9000",
            "--api-key",
            "secret",
            "--coingecko-base-url",
            "https://pro-api.coingecko.com/api/v3",
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(
            cfg.coingecko_base.as_str(),
            "https://pro-api.coingecko.com/api/v3/"
        );
    }

    #[test]
    fn blank_api_key_is_unset() {
        let cfg = parse(&["--api-key", "  "]).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(parse(&["--coingecko-base-url", "not a url"]).is_err());
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        assert!(parse(&["--listen", "localhost"]).is_err());
    }
}
