use std::collections::HashMap;
use std::fmt;

use crate::config::validator;
use crate::error::Result;

/// Canonical uppercase ticker of a crypto asset, e.g. `BTC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Normalise and validate a raw token (3 to 5 word characters).
    pub fn parse(raw: &str) -> Result<Self> {
        let normalised = raw.trim().to_uppercase();
        validator::validate_symbol(&normalised)?;
        Ok(Symbol(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: Symbol,
    pub amount: f64,
}

impl Holding {
    pub fn new(symbol: Symbol, amount: f64) -> Self {
        Self { symbol, amount }
    }
}

/// One leaderboard row as read from storage: a holding tagged with its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct UserHolding {
    pub user: String,
    pub holding: Holding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserHoldings {
    pub user: String,
    pub holdings: Vec<Holding>,
}

/// Price of one unit of each symbol expressed in the target currency.
///
/// A rate of `0.0` marks an unknown or unusable quote; it is never a real price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionMap {
    rates: HashMap<Symbol, f64>,
}

impl ConversionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, rate: f64) {
        self.rates.insert(symbol, rate);
    }

    /// Rate for `symbol`, or `0.0` when the provider gave none.
    pub fn rate(&self, symbol: &Symbol) -> f64 {
        self.rates.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<f64> {
        self.rates.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.rates.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.rates.keys()
    }

    /// Union with a map covering a disjoint symbol set.
    ///
    /// Batches never share symbols, so a collision is a bug upstream; the
    /// earlier rate is kept.
    pub fn merge_disjoint(&mut self, other: ConversionMap) {
        for (symbol, rate) in other.rates {
            debug_assert!(
                !self.rates.contains_key(&symbol),
                "symbol {symbol} appeared in more than one quote batch"
            );
            self.rates.entry(symbol).or_insert(rate);
        }
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Symbol, f64) -> bool,
    {
        self.rates.retain(|symbol, rate| keep(symbol, *rate));
    }
}

impl FromIterator<(Symbol, f64)> for ConversionMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Current and point-in-time rates resolved for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversions {
    pub current: ConversionMap,
    pub historical: ConversionMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioLine {
    pub symbol: Symbol,
    pub amount: f64,
    pub current_value: f64,
    pub historical_value: f64,
    pub percent_change: f64,
}

impl PortfolioLine {
    /// Unit price in the target currency.
    pub fn price(&self) -> f64 {
        if self.amount > 0.0 {
            self.current_value / self.amount
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioValuation {
    pub lines: Vec<PortfolioLine>,
    pub current_total: f64,
    pub historical_total: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserTotal {
    pub user: String,
    pub current_total: f64,
    pub historical_total: f64,
    pub percent_change: f64,
}
