use log::warn;
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::model::{ConversionMap, Symbol};

use super::request::QuoteMode;

/// Turn a raw provider quote (target currency per unit of crypto) into the
/// price of one crypto unit in the target currency. Non-positive quotes map
/// to the `0.0` sentinel.
pub fn invert_rate(raw: f64) -> f64 {
    if raw > 0.0 {
        1.0 / raw
    } else {
        0.0
    }
}

/// Decode a quote response body into inverted rates.
pub fn decode_quotes(body: &str, target_currency: &str, mode: QuoteMode) -> Result<ConversionMap> {
    let json: Value = serde_json::from_str(body)
        .map_err(|err| AppError::quote_fetch(format!("malformed JSON response: {err}")))?;

    let root = json
        .as_object()
        .ok_or_else(|| AppError::quote_fetch("expected a JSON object in quote response"))?;

    ensure_not_error_envelope(root)?;

    let rates = match mode {
        QuoteMode::Current => root,
        QuoteMode::Historical(_) => root
            .get(target_currency)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                AppError::quote_fetch(format!(
                    "historical response is missing the `{target_currency}` wrapper"
                ))
            })?,
    };

    Ok(collect_rates(rates))
}

fn ensure_not_error_envelope(root: &Map<String, Value>) -> Result<()> {
    match root.get("Response").and_then(Value::as_str) {
        Some("Error") => {
            let message = root
                .get("Message")
                .and_then(Value::as_str)
                .unwrap_or("provider returned an error");
            Err(AppError::quote_fetch(message.to_string()))
        }
        _ => Ok(()),
    }
}

fn collect_rates(rates: &Map<String, Value>) -> ConversionMap {
    let mut map = ConversionMap::new();
    for (key, value) in rates {
        let Some(raw) = value.as_f64() else {
            warn!("Skipping non-numeric quote for `{key}`: {value}");
            continue;
        };
        match Symbol::parse(key) {
            Ok(symbol) => map.insert(symbol, invert_rate(raw)),
            Err(_) => warn!("Skipping quote for unrecognised symbol `{key}`"),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(raw: &str) -> Symbol {
        Symbol::parse(raw).unwrap()
    }

    #[test]
    fn inverts_positive_rates_and_zeroes_the_rest() {
        assert_eq!(invert_rate(2.0), 0.5);
        assert_eq!(invert_rate(0.0), 0.0);
        assert_eq!(invert_rate(-4.0), 0.0);
    }

    #[test]
    fn decodes_flat_current_payload() {
        let body = r#"{"BTC": 0.00002, "ETH": 0.0005, "DEAD": 0}"#;
        let map = decode_quotes(body, "USD", QuoteMode::Current).unwrap();

        assert_eq!(map.len(), 3);
        assert!((map.rate(&sym("BTC")) - 50_000.0).abs() < 1e-6);
        assert!((map.rate(&sym("ETH")) - 2_000.0).abs() < 1e-6);
        assert_eq!(map.get(&sym("DEAD")), Some(0.0));
    }

    #[test]
    fn decodes_historical_payload_under_currency_key() {
        let body = r#"{"USD": {"BTC": 0.0001, "LTC": 0.02}}"#;
        let map = decode_quotes(body, "USD", QuoteMode::Historical(1)).unwrap();

        assert!((map.rate(&sym("BTC")) - 10_000.0).abs() < 1e-6);
        assert!((map.rate(&sym("LTC")) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn omits_symbols_absent_from_response() {
        let body = r#"{"BTC": 0.5}"#;
        let map = decode_quotes(body, "USD", QuoteMode::Current).unwrap();

        assert!(!map.contains(&sym("ETH")));
        assert_eq!(map.rate(&sym("ETH")), 0.0);
    }

    #[test]
    fn missing_wrapper_is_a_fetch_failure() {
        let body = r#"{"EUR": {"BTC": 0.0001}}"#;
        let err = decode_quotes(body, "USD", QuoteMode::Historical(1)).unwrap_err();
        assert!(matches!(err, AppError::QuoteFetch(_)), "unexpected error: {err}");
    }

    #[test]
    fn provider_error_envelope_is_surfaced() {
        let body = r#"{"Response": "Error", "Message": "fsym is a required param."}"#;
        let err = decode_quotes(body, "USD", QuoteMode::Current).unwrap_err();
        assert!(
            err.to_string().contains("fsym is a required param."),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn malformed_json_is_a_fetch_failure() {
        let err = decode_quotes("<html>", "USD", QuoteMode::Current).unwrap_err();
        assert!(matches!(err, AppError::QuoteFetch(_)));
    }
}
