use crate::api::BalanceError;
use crate::flow::CountReason;
use crate::password::{AddMessage, FirstRegisterMessage, VerifyMessage};

#[derive(Debug, Clone)]
pub enum Message {
    ScannerToggled,
    ScanInputChanged(String),
    ScanSubmitted,
    BalanceFetched {
        seq: u64,
        result: Result<u64, BalanceError>,
    },
    PasswordCountFetched {
        seq: u64,
        count: usize,
        reason: CountReason,
    },
    FirstRegister(FirstRegisterMessage),
    Verify(VerifyMessage),
    Add(AddMessage),
}
