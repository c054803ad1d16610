use crate::address::is_valid_bitcoin_address;
use crate::api::BalanceError;

/// Active phase of the password flow. Exactly one step renders at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Empty,
    FirstRegister,
    Verify,
    Add,
}

/// Why a password-count fetch was issued. Decides where the step goes
/// once the count lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountReason {
    AddressEntered,
    PasswordAdded,
}

/// A fetch the caller should run. Each carries the generation it was
/// dispatched with; responses echo it back so stale ones can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchBalance { address: String, seq: u64 },
    FetchPasswordCount {
        address: String,
        seq: u64,
        reason: CountReason,
    },
}

/// State machine behind the verification screen.
///
/// Owns address, password count, step, scanner mode, and the balance slot.
/// Transition methods mutate the state and return the fetches to run; the
/// results come back through the `apply_*` methods. Responses carrying an
/// older generation than the current one lost the race and are ignored.
#[derive(Debug, Default)]
pub struct VerificationFlow {
    address: String,
    password_count: usize,
    step: Step,
    scanner_on: bool,
    balance: Option<u64>,
    balance_error: Option<BalanceError>,
    loading_balance: bool,
    balance_seq: u64,
    count_seq: u64,
}

impl VerificationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn password_count(&self) -> usize {
        self.password_count
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn scanner_on(&self) -> bool {
        self.scanner_on
    }

    pub fn balance(&self) -> Option<u64> {
        self.balance
    }

    pub fn balance_error(&self) -> Option<BalanceError> {
        self.balance_error
    }

    pub fn is_loading_balance(&self) -> bool {
        self.loading_balance
    }

    /// Store a candidate address (even an invalid one, for display).
    ///
    /// An actual address change re-keys the balance slot; a valid candidate
    /// additionally turns the scanner off and requests the password count.
    /// The step only moves once that count arrives.
    pub fn set_address(&mut self, candidate: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        let changed = candidate != self.address;
        self.address = candidate.to_string();

        if changed {
            self.balance_seq += 1;
            self.balance = None;
            self.balance_error = None;
            // any count already in flight now belongs to a superseded address
            self.count_seq += 1;
            if self.address.is_empty() {
                self.loading_balance = false;
            } else {
                self.loading_balance = true;
                effects.push(Effect::FetchBalance {
                    address: self.address.clone(),
                    seq: self.balance_seq,
                });
            }
        }

        if !self.address.is_empty() && is_valid_bitcoin_address(&self.address) {
            self.scanner_on = false;
            self.count_seq += 1;
            effects.push(Effect::FetchPasswordCount {
                address: self.address.clone(),
                seq: self.count_seq,
                reason: CountReason::AddressEntered,
            });
        }

        effects
    }

    /// A balance response landed. Only the fetch for the current address may
    /// touch the visible slot.
    pub fn apply_balance(&mut self, seq: u64, result: Result<u64, BalanceError>) {
        if seq != self.balance_seq {
            log::debug!("dropping stale balance response (seq {seq})");
            return;
        }
        self.loading_balance = false;
        match result {
            Ok(sats) => {
                self.balance = Some(sats);
                self.balance_error = None;
            }
            Err(err) => {
                self.balance = None;
                self.balance_error = Some(err);
            }
        }
    }

    /// A password-count response landed. Routes the step: a fresh address
    /// goes to first-registration when no password exists yet, otherwise to
    /// verification; a completed add always returns to verification.
    ///
    /// Returns whether the response was current and applied.
    pub fn apply_password_count(&mut self, seq: u64, count: usize, reason: CountReason) -> bool {
        if seq != self.count_seq {
            log::debug!("dropping stale password count (seq {seq})");
            return false;
        }
        self.password_count = count;
        self.step = match reason {
            CountReason::AddressEntered => {
                if count == 0 {
                    Step::FirstRegister
                } else {
                    Step::Verify
                }
            }
            CountReason::PasswordAdded => Step::Verify,
        };
        true
    }

    /// All registered passwords were entered correctly; move on to adding
    /// another one.
    pub fn password_flow_complete(&mut self, count: usize) {
        self.password_count = count;
        self.step = Step::Add;
    }

    /// A password was registered (first-time or additional). Re-fetch the
    /// count for the current address; the step returns to verification once
    /// it lands.
    pub fn password_added(&mut self) -> Vec<Effect> {
        self.count_seq += 1;
        vec![Effect::FetchPasswordCount {
            address: self.address.clone(),
            seq: self.count_seq,
            reason: CountReason::PasswordAdded,
        }]
    }

    /// Flip scanning mode. Turning it on resets the whole screen so no stale
    /// password flow survives a re-scan; in-flight responses are invalidated.
    pub fn toggle_scanner(&mut self) {
        self.scanner_on = !self.scanner_on;
        if self.scanner_on {
            self.address.clear();
            self.password_count = 0;
            self.step = Step::Empty;
            self.balance = None;
            self.balance_error = None;
            self.loading_balance = false;
            self.balance_seq += 1;
            self.count_seq += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-173 mainnet P2WPKH example and a well-known P2PKH address
    const BECH32: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
    const BASE58: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

    fn count_seq(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchPasswordCount { seq, .. } => Some(*seq),
                _ => None,
            })
            .expect("expected a password count fetch")
    }

    fn balance_seq(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchBalance { seq, .. } => Some(*seq),
                _ => None,
            })
            .expect("expected a balance fetch")
    }

    #[test]
    fn invalid_address_fetches_no_count_and_keeps_step() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address("definitely-not-an-address");
        assert_eq!(flow.address(), "definitely-not-an-address");
        assert_eq!(flow.step(), Step::Empty);
        assert!(effects
            .iter()
            .all(|e| matches!(e, Effect::FetchBalance { .. })));
    }

    #[test]
    fn empty_address_clears_balance_without_network() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_balance(balance_seq(&effects), Ok(500));
        let effects = flow.set_address("");
        assert!(effects.is_empty());
        assert_eq!(flow.balance(), None);
        assert_eq!(flow.balance_error(), None);
        assert!(!flow.is_loading_balance());
    }

    #[test]
    fn zero_count_routes_to_first_register() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_password_count(count_seq(&effects), 0, CountReason::AddressEntered);
        assert_eq!(flow.step(), Step::FirstRegister);
    }

    #[test]
    fn nonzero_count_routes_to_verify() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BASE58);
        flow.apply_password_count(count_seq(&effects), 1, CountReason::AddressEntered);
        assert_eq!(flow.password_count(), 1);
        assert_eq!(flow.step(), Step::Verify);
    }

    #[test]
    fn step_waits_for_count_response() {
        let mut flow = VerificationFlow::new();
        flow.set_address(BECH32);
        assert_eq!(flow.step(), Step::Empty);
    }

    #[test]
    fn valid_address_turns_scanner_off() {
        let mut flow = VerificationFlow::new();
        flow.toggle_scanner();
        assert!(flow.scanner_on());
        flow.set_address(BECH32);
        assert!(!flow.scanner_on());
    }

    #[test]
    fn stale_count_is_discarded() {
        let mut flow = VerificationFlow::new();
        let first = flow.set_address(BECH32);
        let first_seq = count_seq(&first);
        let second = flow.set_address(BASE58);
        assert!(!flow.apply_password_count(first_seq, 0, CountReason::AddressEntered));
        assert_eq!(flow.step(), Step::Empty);
        assert!(flow.apply_password_count(count_seq(&second), 2, CountReason::AddressEntered));
        assert_eq!(flow.step(), Step::Verify);
        assert_eq!(flow.password_count(), 2);
    }

    #[test]
    fn late_balance_for_superseded_address_is_ignored() {
        let mut flow = VerificationFlow::new();
        let first = flow.set_address(BECH32);
        let first_seq = balance_seq(&first);
        let second = flow.set_address(BASE58);
        // A's response resolves after B's request was issued
        flow.apply_balance(first_seq, Ok(111));
        assert_eq!(flow.balance(), None);
        assert!(flow.is_loading_balance());
        flow.apply_balance(balance_seq(&second), Ok(222));
        assert_eq!(flow.balance(), Some(222));
        assert!(!flow.is_loading_balance());
    }

    #[test]
    fn balance_failure_sets_error_marker() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_balance(balance_seq(&effects), Err(BalanceError::Fetch));
        assert_eq!(flow.balance(), None);
        assert_eq!(flow.balance_error(), Some(BalanceError::Fetch));
    }

    #[test]
    fn scanner_on_resets_everything() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BASE58);
        flow.apply_balance(balance_seq(&effects), Ok(999));
        flow.apply_password_count(count_seq(&effects), 3, CountReason::AddressEntered);
        flow.toggle_scanner();
        assert!(flow.scanner_on());
        assert_eq!(flow.address(), "");
        assert_eq!(flow.password_count(), 0);
        assert_eq!(flow.step(), Step::Empty);
        assert_eq!(flow.balance(), None);
        assert_eq!(flow.balance_error(), None);
    }

    #[test]
    fn scanner_toggle_invalidates_inflight_count() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        let seq = count_seq(&effects);
        flow.toggle_scanner();
        flow.apply_password_count(seq, 5, CountReason::AddressEntered);
        assert_eq!(flow.step(), Step::Empty);
        assert_eq!(flow.password_count(), 0);
    }

    #[test]
    fn verify_completion_moves_to_add() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_password_count(count_seq(&effects), 2, CountReason::AddressEntered);
        flow.password_flow_complete(2);
        assert_eq!(flow.step(), Step::Add);
        assert_eq!(flow.password_count(), 2);
    }

    #[test]
    fn password_added_refetches_then_returns_to_verify() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_password_count(count_seq(&effects), 0, CountReason::AddressEntered);
        assert_eq!(flow.step(), Step::FirstRegister);
        let effects = flow.password_added();
        assert_eq!(flow.step(), Step::FirstRegister);
        flow.apply_password_count(count_seq(&effects), 1, CountReason::PasswordAdded);
        assert_eq!(flow.step(), Step::Verify);
        assert_eq!(flow.password_count(), 1);
    }

    #[test]
    fn add_and_verify_loop() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_password_count(count_seq(&effects), 1, CountReason::AddressEntered);
        flow.password_flow_complete(1);
        assert_eq!(flow.step(), Step::Add);
        let effects = flow.password_added();
        flow.apply_password_count(count_seq(&effects), 2, CountReason::PasswordAdded);
        assert_eq!(flow.step(), Step::Verify);
        flow.password_flow_complete(2);
        assert_eq!(flow.step(), Step::Add);
    }

    #[test]
    fn rescan_of_same_address_refetches_count_but_not_balance() {
        let mut flow = VerificationFlow::new();
        let effects = flow.set_address(BECH32);
        flow.apply_balance(balance_seq(&effects), Ok(42));
        let effects = flow.set_address(BECH32);
        assert!(effects
            .iter()
            .all(|e| matches!(e, Effect::FetchPasswordCount { .. })));
        assert_eq!(flow.balance(), Some(42));
    }
}
