use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::model::{ConversionMap, Symbol};

use super::QuoteSource;

/// One request as seen by [`FixedQuotes`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteCall {
    Current(Vec<String>),
    Historical(Vec<String>, i64),
}

/// Quote source serving fixed, already-inverted rates and recording every
/// request it receives.
#[derive(Default)]
pub struct FixedQuotes {
    pub current: HashMap<String, f64>,
    pub historical: HashMap<String, f64>,
    /// Fail every historical request with a quote fetch error.
    pub fail_historical: bool,
    calls: Mutex<Vec<QuoteCall>>,
}

impl FixedQuotes {
    pub fn new(current: &[(&str, f64)], historical: &[(&str, f64)]) -> Self {
        Self {
            current: table(current),
            historical: table(historical),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<QuoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: QuoteCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl QuoteSource for FixedQuotes {
    async fn fetch_current(
        &self,
        symbols: &[Symbol],
        _target_currency: &str,
    ) -> Result<ConversionMap> {
        self.record(QuoteCall::Current(names(symbols)));
        Ok(lookup(&self.current, symbols))
    }

    async fn fetch_historical(
        &self,
        symbols: &[Symbol],
        _target_currency: &str,
        as_of: i64,
    ) -> Result<ConversionMap> {
        self.record(QuoteCall::Historical(names(symbols), as_of));
        if self.fail_historical {
            return Err(AppError::quote_fetch("historical endpoint unavailable"));
        }
        Ok(lookup(&self.historical, symbols))
    }
}

pub fn names(symbols: &[Symbol]) -> Vec<String> {
    symbols.iter().map(Symbol::to_string).collect()
}

fn lookup(table: &HashMap<String, f64>, symbols: &[Symbol]) -> ConversionMap {
    symbols
        .iter()
        .filter_map(|symbol| {
            table
                .get(symbol.as_str())
                .map(|rate| (symbol.clone(), *rate))
        })
        .collect()
}

fn table(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(symbol, rate)| (symbol.to_string(), *rate))
        .collect()
}
