use crate::app::controller::{AppController, ValuationOptions};
use crate::cli::{Cli, Commands, ExchangeArgs};
use crate::config::{validator, Config};
use crate::error::Result;

/// Entry point used by `main`: resolve config, run one command, return its output.
///
/// Arguments are validated before the database is opened or any request is sent.
pub async fn run(cli: Cli) -> Result<String> {
    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config = config.with_database_path(db);
    }

    match cli.command {
        Commands::Add { user } => AppController::from_config(&config)?.add_user(&user),
        Commands::Update {
            user,
            crypto,
            amount,
        } => {
            let amount = validator::parse_amount(&amount)?;
            AppController::from_config(&config)?.update_holding(&user, &crypto, amount)
        }
        Commands::Portfolio { user, exchange } => {
            let options = valuation_options(&exchange, &config)?;
            AppController::from_config(&config)?
                .portfolio(&user, &options)
                .await
        }
        Commands::Leaderboard { exchange } => {
            let options = valuation_options(&exchange, &config)?;
            AppController::from_config(&config)?
                .leaderboard(&options)
                .await
        }
    }
}

fn valuation_options(exchange: &ExchangeArgs, config: &Config) -> Result<ValuationOptions> {
    let currency = exchange
        .currency
        .as_deref()
        .unwrap_or(&config.default_currency);
    ValuationOptions::new(currency, exchange.duration)
}
