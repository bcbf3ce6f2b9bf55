use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::validator;
use crate::valuation::Lookback;

#[derive(Parser, Debug)]
#[command(name = "gainz")]
#[command(about = "Track crypto holdings and how their value changed over time")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite file holding users and balances
    #[arg(long, global = true, env = "GAINZ_DB")]
    pub db: Option<PathBuf>,

    /// Optional JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a user
    Add {
        user: String,
    },

    /// Update a user's crypto balance; an amount of zero or less removes it
    Update {
        user: String,
        crypto: String,
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Display a user's portfolio
    Portfolio {
        user: String,
        #[command(flatten)]
        exchange: ExchangeArgs,
    },

    /// Display the current leaderboard
    Leaderboard {
        #[command(flatten)]
        exchange: ExchangeArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ExchangeArgs {
    /// Currency to report values in (defaults to the configured currency)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Lookback window: hour, day, week, month or year
    #[arg(short, long, default_value = "day", value_parser = validator::parse_lookback)]
    pub duration: Lookback,
}
