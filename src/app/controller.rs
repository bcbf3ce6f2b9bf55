use log::{debug, info};

use crate::config::{validator, Config};
use crate::error::{AppError, Result};
use crate::fetch::{QuoteClient, QuoteSource};
use crate::model::Symbol;
use crate::records::Records;
use crate::ui::{render_leaderboard, render_portfolio};
use crate::valuation::{
    group_by_user, rank_by_value, value_portfolio, value_users, ConversionResolver, FilterMode,
    Lookback,
};

/// Target currency and lookback window for a valuation command, already
/// validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationOptions {
    pub currency: String,
    pub lookback: Lookback,
}

impl ValuationOptions {
    pub fn new(currency: &str, lookback: Lookback) -> Result<Self> {
        Ok(Self {
            currency: validator::normalise_currency(currency)?,
            lookback,
        })
    }
}

/// Runs one command against the holdings store and the quote provider and
/// returns the text to print.
pub struct AppController<Q> {
    records: Records,
    resolver: ConversionResolver<Q>,
}

impl AppController<QuoteClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let records = Records::open(&config.database_path)?;
        let client = QuoteClient::new(config)?;
        Ok(Self::new(
            records,
            ConversionResolver::with_batch_limit(client, config.historical_batch_limit),
        ))
    }
}

impl<Q: QuoteSource> AppController<Q> {
    pub fn new(records: Records, resolver: ConversionResolver<Q>) -> Self {
        Self { records, resolver }
    }

    pub fn add_user(&self, name: &str) -> Result<String> {
        validator::validate_username(name)
            .map_err(|_| AppError::message(format!("Couldn't add {name}: invalid name")))?;
        self.records.add_user(name)?;
        info!("Added user {name}");
        Ok("Added user successfully.".to_string())
    }

    pub fn update_holding(&self, name: &str, symbol: &str, amount: f64) -> Result<String> {
        validator::validate_username(name).map_err(|_| {
            AppError::message(format!("Couldn't update balance: invalid name {name}"))
        })?;
        let symbol = Symbol::parse(symbol).map_err(|_| {
            AppError::message(format!("Couldn't update balance: invalid symbol {symbol}"))
        })?;
        if !amount.is_finite() {
            return Err(AppError::message(
                "Couldn't update balance: invalid amount",
            ));
        }

        self.records.set_holding(name, &symbol, amount)?;
        info!("Set {name}'s {symbol} holding to {amount}");
        Ok("Updated balance successfully.".to_string())
    }

    pub async fn portfolio(&self, name: &str, options: &ValuationOptions) -> Result<String> {
        validator::validate_username(name).map_err(|_| {
            AppError::message(format!("Couldn't display portfolio: invalid name {name}"))
        })?;
        let user_id = self.records.find_user_id(name)?;
        let holdings = self.records.holdings_for_user(user_id)?;
        if holdings.is_empty() {
            return Err(AppError::message(format!(
                "Couldn't display portfolio: {name} has no holdings.\nTry running: gainz update {name} CRYPTO AMOUNT"
            )));
        }

        let symbols: Vec<Symbol> = holdings.iter().map(|h| h.symbol.clone()).collect();
        let conversions = self
            .resolver
            .resolve(
                &symbols,
                &options.currency,
                options.lookback,
                FilterMode::KeepAll,
            )
            .await?;

        let valuation = value_portfolio(&holdings, &conversions);
        debug!(
            "Valued {} of {} holdings for {name}",
            valuation.lines.len(),
            holdings.len()
        );
        let ranked = rank_by_value(valuation.lines.clone(), |line| line.current_value);

        Ok(render_portfolio(
            name,
            &options.currency,
            &valuation,
            &ranked,
        ))
    }

    pub async fn leaderboard(&self, options: &ValuationOptions) -> Result<String> {
        if self.records.user_count()? == 0 {
            return Err(AppError::message(
                "Couldn't display leaderboard: no user data.\nTry running: gainz add USER",
            ));
        }

        let symbols = self.records.all_symbols()?;
        if symbols.is_empty() {
            return Err(AppError::message(
                "Couldn't display leaderboard: no crypto data.\nTry running: gainz update USER CRYPTO AMOUNT",
            ));
        }

        let conversions = self
            .resolver
            .resolve(
                &symbols,
                &options.currency,
                options.lookback,
                FilterMode::DropMissingHistorical,
            )
            .await?;

        let valid_symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|symbol| conversions.current.contains(symbol))
            .collect();
        let rows = self.records.holdings_for_symbols(&valid_symbols)?;
        let users = group_by_user(rows);
        let totals = value_users(&users, &conversions);
        let ranked = rank_by_value(totals, |total| total.current_total);

        Ok(render_leaderboard(&options.currency, &ranked))
    }
}
