use crate::model::{PortfolioLine, PortfolioValuation, UserTotal};
use crate::valuation::Ranked;

use super::format::{format_percent, format_price, share_of_total};
use super::table::TextTable;

pub fn render_portfolio(
    user: &str,
    currency: &str,
    valuation: &PortfolioValuation,
    ranked: &[Ranked<PortfolioLine>],
) -> String {
    let mut table = TextTable::new([
        "Percent".to_string(),
        "Currency".to_string(),
        "Price".to_string(),
        "Change".to_string(),
        "Holdings".to_string(),
        format!("Value ({currency})"),
    ]);

    for Ranked { item: line, .. } in ranked {
        table.push_row(vec![
            format!(
                "{}%",
                share_of_total(line.current_value, valuation.current_total)
            ),
            line.symbol.to_string(),
            format_price(line.price()),
            format_percent(line.percent_change),
            format_price(line.amount),
            format_price(line.current_value),
        ]);
    }

    format!(
        "USER: {user}\nTOTAL: {} {}\n\n{}",
        format_price(valuation.current_total),
        format_percent(valuation.percent_change),
        table.render()
    )
}

pub fn render_leaderboard(currency: &str, ranked: &[Ranked<UserTotal>]) -> String {
    let mut table = TextTable::new([
        "Ranking".to_string(),
        "User".to_string(),
        format!("Total ({currency})"),
        "Change".to_string(),
    ]);

    for Ranked { rank, item } in ranked {
        table.push_row(vec![
            rank.to_string(),
            item.user.clone(),
            format_price(item.current_total),
            format_percent(item.percent_change),
        ]);
    }

    format!("LEADERBOARD\n\n{}", table.render())
}
