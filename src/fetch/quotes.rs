use log::debug;
use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::{ConversionMap, Symbol};

use super::decode::decode_quotes;
use super::request::{build_quote_url, QuoteMode};

/// Source of inverted conversion rates for a set of symbols.
#[allow(async_fn_in_trait)]
pub trait QuoteSource {
    async fn fetch_current(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
    ) -> Result<ConversionMap>;

    async fn fetch_historical(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
        as_of: i64,
    ) -> Result<ConversionMap>;
}

/// HTTP client for the CryptoCompare price endpoints. Issues exactly one
/// request per call and never retries.
pub struct QuoteClient {
    client: Client,
    api_root: String,
}

impl QuoteClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            api_root: config.api_root.clone(),
        })
    }

    async fn fetch(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
        mode: QuoteMode,
    ) -> Result<ConversionMap> {
        if symbols.is_empty() {
            return Ok(ConversionMap::new());
        }

        let url = build_quote_url(&self.api_root, symbols, target_currency, mode)?;
        debug!("Requesting quotes: {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| describe_transport_error(&url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::quote_fetch(format!(
                "{} responded with status {}",
                url.path(),
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| describe_transport_error(&url, err))?;

        let map = decode_quotes(&body, target_currency, mode)?;
        debug!(
            "Received {} of {} requested quotes from {}",
            map.len(),
            symbols.len(),
            url.path()
        );
        Ok(map)
    }
}

impl QuoteSource for QuoteClient {
    async fn fetch_current(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
    ) -> Result<ConversionMap> {
        self.fetch(symbols, target_currency, QuoteMode::Current)
            .await
    }

    async fn fetch_historical(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
        as_of: i64,
    ) -> Result<ConversionMap> {
        self.fetch(symbols, target_currency, QuoteMode::Historical(as_of))
            .await
    }
}

fn describe_transport_error(url: &reqwest::Url, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::quote_fetch(format!("request to {} timed out", url.path()))
    } else {
        AppError::quote_fetch(format!("request to {} failed: {}", url.path(), err))
    }
}
