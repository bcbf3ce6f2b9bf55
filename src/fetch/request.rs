use reqwest::Url;

use crate::error::{AppError, Result};
use crate::model::Symbol;

use super::batch::join_symbols;

pub const CURRENT_PRICE_PATH: &str = "price";
pub const HISTORICAL_PRICE_PATH: &str = "pricehistorical";

/// Which endpoint a quote request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    Current,
    /// Point-in-time quote at the given unix timestamp (seconds).
    Historical(i64),
}

impl QuoteMode {
    pub fn path(&self) -> &'static str {
        match self {
            QuoteMode::Current => CURRENT_PRICE_PATH,
            QuoteMode::Historical(_) => HISTORICAL_PRICE_PATH,
        }
    }
}

/// Build the endpoint URL with form-encoded `fsym`, `tsyms` and, for
/// historical quotes only, `ts`.
pub fn build_quote_url(
    api_root: &str,
    symbols: &[Symbol],
    target_currency: &str,
    mode: QuoteMode,
) -> Result<Url> {
    let endpoint = format!("{}{}", api_root, mode.path());
    let tsyms = join_symbols(symbols);

    let mut params = vec![
        ("fsym", target_currency.to_string()),
        ("tsyms", tsyms),
    ];
    if let QuoteMode::Historical(timestamp) = mode {
        params.push(("ts", timestamp.to_string()));
    }

    Url::parse_with_params(&endpoint, &params).map_err(|err| {
        AppError::config(format!("invalid quote endpoint `{endpoint}`: {err}"))
    })
}
