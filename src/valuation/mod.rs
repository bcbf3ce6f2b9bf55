pub mod calculator;
pub mod change;
pub mod lookback;
pub mod rank;
pub mod resolver;

pub use calculator::{group_by_user, value_portfolio, value_users};
pub use change::percent_change;
pub use lookback::Lookback;
pub use rank::{rank_by_value, Ranked};
pub use resolver::{drop_missing_historical, ConversionResolver, FilterMode};
