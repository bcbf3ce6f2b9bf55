pub mod format;
pub mod report;
pub mod table;

pub use format::{format_percent, format_price};
pub use report::{render_leaderboard, render_portfolio};
pub use table::TextTable;
