use bitcoin::{Address, Network};
use std::str::FromStr;

/// Whether a string is a well-formed mainnet Bitcoin address.
///
/// Both common encodings pass (base58check and bech32, checksum included);
/// addresses of other networks and everything else are rejected.
pub fn is_valid_bitcoin_address(candidate: &str) -> bool {
    match Address::from_str(candidate) {
        Ok(address) => address.is_valid_for_network(Network::Bitcoin),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mainnet_bech32() {
        assert!(is_valid_bitcoin_address(
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        ));
    }

    #[test]
    fn accepts_mainnet_base58() {
        // P2PKH and P2SH
        assert!(is_valid_bitcoin_address("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"));
        assert!(is_valid_bitcoin_address("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(!is_valid_bitcoin_address(""));
    }

    #[test]
    fn rejects_bad_checksum() {
        assert!(!is_valid_bitcoin_address(
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"
        ));
        assert!(!is_valid_bitcoin_address("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3"));
    }

    #[test]
    fn rejects_other_networks() {
        // testnet bech32
        assert!(!is_valid_bitcoin_address(
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_bitcoin_address("hello world"));
        assert!(!is_valid_bitcoin_address("bc1"));
    }
}
