use chrono::Utc;
use log::debug;

use crate::config::HISTORICAL_SYMBOLS_MAX_LENGTH;
use crate::error::Result;
use crate::fetch::{batch_symbols, QuoteSource};
use crate::model::{ConversionMap, Conversions, Symbol};

use super::Lookback;

/// Whether symbols without a usable historical quote survive resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Return both maps exactly as fetched.
    KeepAll,
    /// Drop symbols whose historical rate is `0` and restrict the current
    /// map to the symbols that remain.
    DropMissingHistorical,
}

/// Fetches current and historical rates for a symbol set, batching the
/// historical requests to respect the endpoint's length limit.
pub struct ConversionResolver<Q> {
    source: Q,
    batch_limit: usize,
}

impl<Q: QuoteSource> ConversionResolver<Q> {
    pub fn new(source: Q) -> Self {
        Self::with_batch_limit(source, HISTORICAL_SYMBOLS_MAX_LENGTH)
    }

    pub fn with_batch_limit(source: Q, batch_limit: usize) -> Self {
        Self {
            source,
            batch_limit,
        }
    }

    pub fn source(&self) -> &Q {
        &self.source
    }

    pub async fn resolve(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
        lookback: Lookback,
        filter: FilterMode,
    ) -> Result<Conversions> {
        let now = Utc::now().timestamp();
        self.resolve_at(symbols, target_currency, lookback, filter, now)
            .await
    }

    /// Same as [`resolve`](Self::resolve) with an explicit "now" in unix seconds.
    pub async fn resolve_at(
        &self,
        symbols: &[Symbol],
        target_currency: &str,
        lookback: Lookback,
        filter: FilterMode,
        now: i64,
    ) -> Result<Conversions> {
        let as_of = lookback.timestamp_before(now);
        let batches = batch_symbols(symbols, self.batch_limit);
        debug!(
            "Resolving {} symbols in {} as of {} ({} historical batches)",
            symbols.len(),
            target_currency,
            as_of,
            batches.len()
        );

        let mut historical = ConversionMap::new();
        for batch in batches.iter().filter(|batch| !batch.is_empty()) {
            let rates = self
                .source
                .fetch_historical(batch, target_currency, as_of)
                .await?;
            historical.merge_disjoint(rates);
        }

        let current = self.source.fetch_current(symbols, target_currency).await?;

        let conversions = Conversions {
            current,
            historical,
        };

        Ok(match filter {
            FilterMode::KeepAll => conversions,
            FilterMode::DropMissingHistorical => drop_missing_historical(conversions),
        })
    }
}

/// Remove every symbol whose historical rate is `0`, then keep only current
/// rates for the surviving symbols.
pub fn drop_missing_historical(conversions: Conversions) -> Conversions {
    let Conversions {
        mut current,
        mut historical,
    } = conversions;

    historical.retain(|_, rate| rate != 0.0);
    current.retain(|symbol, _| historical.contains(symbol));

    Conversions {
        current,
        historical,
    }
}
