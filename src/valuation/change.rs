/// Signed percent change from `past` to `current`, rounded to two decimals.
///
/// A zero baseline yields `0.0` rather than a division by zero.
pub fn percent_change(current: f64, past: f64) -> f64 {
    if past == 0.0 {
        return 0.0;
    }
    round2((current - past) / past * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_signed_change() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
    }

    #[test]
    fn zero_baseline_is_suppressed() {
        assert_eq!(percent_change(50.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(percent_change(1.0, 3.0), -66.67);
        assert_eq!(percent_change(4.0, 3.0), 33.33);
    }
}
