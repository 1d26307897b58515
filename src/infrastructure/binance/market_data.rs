//! Binance Market Data Service
//!
//! Fetches historical klines from the Binance REST API. When the primary
//! endpoint fails (network, HTTP status or malformed payload) the public
//! market-data mirror is tried before giving up.

use crate::config::MarketDataConfig;
use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::CandleSource;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::Result;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Binance caps a single klines request at 1000 bars.
const MAX_KLINES_PER_REQUEST: usize = 1000;

struct Endpoint {
    label: &'static str,
    base_url: String,
    /// Only the primary endpoint receives the API key
    api_key: Option<String>,
}

pub struct BinanceMarketDataService {
    client: ClientWithMiddleware,
    endpoints: Vec<Endpoint>,
}

impl BinanceMarketDataService {
    pub fn builder() -> BinanceMarketDataServiceBuilder {
        BinanceMarketDataServiceBuilder::default()
    }

    pub fn from_config(config: &MarketDataConfig) -> Self {
        let mut builder = Self::builder()
            .base_url(config.binance_base_url.clone())
            .mirror_url(config.binance_mirror_url.clone())
            .client(HttpClientFactory::create_client(config));
        if let Some(key) = &config.binance_api_key {
            builder = builder.api_key(key.clone());
        }
        builder.build()
    }

    async fn fetch_from(
        &self,
        endpoint: &Endpoint,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let limit = limit.to_string();
        let url = build_url_with_query(
            &format!("{}/api/v3/klines", endpoint.base_url.trim_end_matches('/')),
            &[
                ("symbol", symbol),
                ("interval", timeframe.as_binance_interval()),
                ("limit", limit.as_str()),
            ],
        );
        debug!("BinanceMarketDataService: GET {} ({})", url, endpoint.label);

        let mut request = self.client.get(&url);
        if let Some(key) = &endpoint.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let http_error = |reason: String| MarketDataError::Http {
            source_name: endpoint.label.to_string(),
            reason,
        };

        let response = request.send().await.map_err(|e| http_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(format!("status {}: {}", status, body)));
        }

        let klines: Vec<Value> = response
            .json()
            .await
            .map_err(|e| MarketDataError::InvalidResponse {
                symbol: symbol.to_string(),
                reason: format!("klines payload is not a JSON array: {}", e),
            })?;

        parse_klines(symbol, &klines)
    }
}

#[async_trait]
impl CandleSource for BinanceMarketDataService {
    fn name(&self) -> &str {
        "binance"
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let symbol = symbol.trim().to_uppercase();
        let limit = limit.clamp(1, MAX_KLINES_PER_REQUEST);
        let mut attempts = Vec::new();

        for endpoint in &self.endpoints {
            match self.fetch_from(endpoint, &symbol, timeframe, limit).await {
                Ok(candles) => {
                    info!(
                        "BinanceMarketDataService: Fetched {} bars for {} ({}) from {}",
                        candles.len(),
                        symbol,
                        timeframe,
                        endpoint.label
                    );
                    return Ok(candles);
                }
                Err(e) => {
                    warn!(
                        "BinanceMarketDataService: {} endpoint failed for {}: {}",
                        endpoint.label, symbol, e
                    );
                    attempts.push(format!("{}: {}", endpoint.label, e));
                }
            }
        }

        Err(MarketDataError::AllSourcesFailed { symbol, attempts }.into())
    }
}

#[derive(Default)]
pub struct BinanceMarketDataServiceBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    mirror_url: Option<String>,
    client: Option<ClientWithMiddleware>,
}

impl BinanceMarketDataServiceBuilder {
    pub fn api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn mirror_url(mut self, mirror_url: String) -> Self {
        self.mirror_url = Some(mirror_url);
        self
    }

    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> BinanceMarketDataService {
        let defaults = MarketDataConfig::default();
        let client = self
            .client
            .unwrap_or_else(|| HttpClientFactory::create_client(&defaults));

        let mut endpoints = vec![Endpoint {
            label: "primary",
            base_url: self.base_url.unwrap_or(defaults.binance_base_url),
            api_key: self.api_key,
        }];
        if let Some(mirror) = self.mirror_url.filter(|m| !m.is_empty()) {
            endpoints.push(Endpoint {
                label: "mirror",
                base_url: mirror,
                api_key: None,
            });
        }

        BinanceMarketDataService { client, endpoints }
    }
}

/// Parses the klines array format
/// `[open_time, "open", "high", "low", "close", "volume", close_time, ...]`.
///
/// A malformed row fails the whole payload instead of being skipped, so a
/// gap never silently shifts the indicator windows.
pub fn parse_klines(symbol: &str, klines: &[Value]) -> Result<Vec<Candle>, MarketDataError> {
    klines
        .iter()
        .enumerate()
        .map(|(i, kline)| {
            parse_kline(kline).ok_or_else(|| MarketDataError::InvalidResponse {
                symbol: symbol.to_string(),
                reason: format!("malformed kline at position {}: {}", i, kline),
            })
        })
        .collect()
}

fn parse_kline(kline: &Value) -> Option<Candle> {
    let arr = kline.as_array()?;
    if arr.len() < 6 {
        return None;
    }

    let number = |v: &Value| -> Option<f64> {
        match v {
            Value::String(s) => s.parse::<f64>().ok(),
            other => other.as_f64(),
        }
    };

    Some(Candle {
        timestamp: arr[0].as_i64()?,
        open: number(&arr[1])?,
        high: number(&arr[2])?,
        low: number(&arr[3])?,
        close: number(&arr[4])?,
        volume: number(&arr[5])?,
    })
}
