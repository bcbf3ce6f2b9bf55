use crate::error::{AppError, Result};
use crate::valuation::Lookback;

use super::Config;

/// Validate a loaded config and surface every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    if config.api_root.trim().is_empty() {
        issues.push("api_root must not be empty".to_string());
    } else if !config.api_root.ends_with('/') {
        issues.push(format!(
            "api_root `{}` must end with a trailing slash",
            config.api_root
        ));
    }

    if config.database_path.as_os_str().is_empty() {
        issues.push("database_path must not be empty".to_string());
    }

    if config.request_timeout_secs == 0 {
        issues.push("request_timeout_secs must be greater than zero".to_string());
    }

    // A single five-character symbol plus its separator must fit in one batch.
    if config.historical_batch_limit < 5 {
        issues.push(format!(
            "historical_batch_limit {} is too small to hold a single symbol",
            config.historical_batch_limit
        ));
    }

    if validate_currency(&config.default_currency).is_err() {
        issues.push(format!(
            "default_currency `{}` is not a valid currency code",
            config.default_currency
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

/// Returns true when `value` is `min..=max` word characters (`[A-Za-z0-9_]`).
pub fn is_word_token(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len) && value.chars().all(is_word_char)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    if is_word_token(symbol, 3, 5) {
        Ok(())
    } else {
        Err(AppError::config(format!("invalid symbol `{symbol}`")))
    }
}

pub fn validate_currency(currency: &str) -> Result<()> {
    if is_word_token(currency, 3, 5) {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "invalid exchange currency `{currency}`"
        )))
    }
}

/// Uppercase and validate a target currency code.
pub fn normalise_currency(raw: &str) -> Result<String> {
    let currency = raw.trim().to_uppercase();
    validate_currency(&currency)?;
    Ok(currency)
}

pub fn validate_username(name: &str) -> Result<()> {
    if !name.is_empty() && name.chars().all(is_word_char) {
        Ok(())
    } else {
        Err(AppError::config(format!("invalid name `{name}`")))
    }
}

pub fn parse_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("invalid amount `{raw}`")))?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(AppError::config(format!("invalid amount `{raw}`")))
    }
}

pub fn parse_lookback(raw: &str) -> Result<Lookback> {
    raw.parse()
}
