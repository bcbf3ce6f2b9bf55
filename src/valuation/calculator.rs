use crate::model::{
    Conversions, Holding, PortfolioLine, PortfolioValuation, UserHolding, UserHoldings, UserTotal,
};

use super::percent_change;

/// Value one user's holdings against both rate maps.
///
/// Lines without a usable historical baseline (historical value `0`) are left
/// out of the result and of both totals.
pub fn value_portfolio(holdings: &[Holding], conversions: &Conversions) -> PortfolioValuation {
    let lines: Vec<PortfolioLine> = holdings
        .iter()
        .map(|holding| {
            let current_value = conversions.current.rate(&holding.symbol) * holding.amount;
            let historical_value = conversions.historical.rate(&holding.symbol) * holding.amount;
            PortfolioLine {
                symbol: holding.symbol.clone(),
                amount: holding.amount,
                current_value,
                historical_value,
                percent_change: percent_change(current_value, historical_value),
            }
        })
        .filter(|line| line.historical_value != 0.0)
        .collect();

    let current_total: f64 = lines.iter().map(|line| line.current_value).sum();
    let historical_total: f64 = lines.iter().map(|line| line.historical_value).sum();

    PortfolioValuation {
        lines,
        current_total,
        historical_total,
        percent_change: percent_change(current_total, historical_total),
    }
}

/// Group flat storage rows by user, keeping users in first-appearance order
/// and each user's holdings in row order.
pub fn group_by_user(rows: Vec<UserHolding>) -> Vec<UserHoldings> {
    let mut groups: Vec<UserHoldings> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|group| group.user == row.user) {
            Some(group) => group.holdings.push(row.holding),
            None => groups.push(UserHoldings {
                user: row.user,
                holdings: vec![row.holding],
            }),
        }
    }
    groups
}

/// Total each user's holdings. Unlike [`value_portfolio`], holdings with a
/// zero historical rate still contribute their current value.
pub fn value_users(users: &[UserHoldings], conversions: &Conversions) -> Vec<UserTotal> {
    users
        .iter()
        .map(|user| {
            let current_total: f64 = user
                .holdings
                .iter()
                .map(|holding| conversions.current.rate(&holding.symbol) * holding.amount)
                .sum();
            let historical_total: f64 = user
                .holdings
                .iter()
                .map(|holding| conversions.historical.rate(&holding.symbol) * holding.amount)
                .sum();
            UserTotal {
                user: user.user.clone(),
                current_total,
                historical_total,
                percent_change: percent_change(current_total, historical_total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConversionMap, Symbol};
    use crate::valuation::drop_missing_historical;

    fn sym(raw: &str) -> Symbol {
        Symbol::parse(raw).unwrap()
    }

    fn rates(entries: &[(&str, f64)]) -> ConversionMap {
        entries
            .iter()
            .map(|(symbol, rate)| (sym(symbol), *rate))
            .collect()
    }

    fn conversions() -> Conversions {
        Conversions {
            current: rates(&[("BTC", 100.0), ("XYZ", 5.0), ("ETH", 10.0)]),
            historical: rates(&[("BTC", 80.0), ("XYZ", 0.0), ("ETH", 10.0)]),
        }
    }

    fn row(user: &str, symbol: &str, amount: f64) -> UserHolding {
        UserHolding {
            user: user.to_string(),
            holding: Holding::new(sym(symbol), amount),
        }
    }

    #[test]
    fn drops_lines_without_historical_baseline() {
        let holdings = vec![Holding::new(sym("BTC"), 1.0), Holding::new(sym("XYZ"), 1.0)];
        let valuation = value_portfolio(&holdings, &conversions());

        assert_eq!(valuation.lines.len(), 1);
        assert_eq!(valuation.lines[0].symbol, sym("BTC"));
        assert_eq!(valuation.current_total, 100.0);
        assert_eq!(valuation.historical_total, 80.0);
        assert_eq!(valuation.percent_change, 25.0);
        assert_eq!(valuation.lines[0].percent_change, 25.0);
    }

    #[test]
    fn unknown_symbols_drop_out_of_portfolio() {
        let holdings = vec![Holding::new(sym("DOGE"), 1000.0)];
        let valuation = value_portfolio(&holdings, &conversions());

        assert!(valuation.lines.is_empty());
        assert_eq!(valuation.current_total, 0.0);
        assert_eq!(valuation.percent_change, 0.0);
    }

    #[test]
    fn groups_rows_in_first_appearance_order() {
        let groups = group_by_user(vec![
            row("bob", "BTC", 1.0),
            row("alice", "ETH", 2.0),
            row("bob", "ETH", 3.0),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].user, "bob");
        assert_eq!(groups[0].holdings.len(), 2);
        assert_eq!(groups[1].user, "alice");
    }

    #[test]
    fn user_totals_keep_holdings_with_zero_history() {
        let users = group_by_user(vec![row("bob", "BTC", 1.0), row("bob", "XYZ", 2.0)]);
        let totals = value_users(&users, &conversions());

        assert_eq!(totals[0].current_total, 110.0);
        assert_eq!(totals[0].historical_total, 80.0);
        assert_eq!(totals[0].percent_change, 37.5);
    }

    #[test]
    fn filtered_conversions_exclude_symbol_from_user_totals() {
        let users = group_by_user(vec![row("bob", "BTC", 1.0), row("bob", "XYZ", 2.0)]);
        let filtered = drop_missing_historical(conversions());
        let totals = value_users(&users, &filtered);

        assert_eq!(totals[0].current_total, 100.0);
        assert_eq!(totals[0].historical_total, 80.0);
    }
}
