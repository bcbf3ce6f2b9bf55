/// Shown in the change column when no meaningful change exists.
pub const NO_CHANGE: &str = "-------";

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// `(+12.34%)`, `(-5.00%)`, or a dashed placeholder for exactly zero.
pub fn format_percent(percent: f64) -> String {
    if percent == 0.0 {
        return NO_CHANGE.to_string();
    }
    let sign = if percent > 0.0 { "+" } else { "" };
    format!("({sign}{percent:.2}%)")
}

/// Whole-number share of `value` in `total`, truncated; `0` for an empty total.
pub fn share_of_total(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        0
    } else {
        (value / total * 100.0) as i64
    }
}
