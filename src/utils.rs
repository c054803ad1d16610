pub fn sats_to_btc(sats: u64) -> f64 {
    sats as f64 / 100_000_000.0
}

/// Balance line shown under the address.
pub fn format_balance(sats: u64) -> String {
    format!("잔액: {} Satoshi ({:.8} BTC)", sats, sats_to_btc(sats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_balance_line() {
        assert_eq!(
            format_balance(123456),
            "잔액: 123456 Satoshi (0.00123456 BTC)"
        );
    }

    #[test]
    fn formats_zero_balance() {
        assert_eq!(format_balance(0), "잔액: 0 Satoshi (0.00000000 BTC)");
    }

    #[test]
    fn formats_whole_coins() {
        assert_eq!(
            format_balance(250_000_000),
            "잔액: 250000000 Satoshi (2.50000000 BTC)"
        );
    }
}
