use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cashpoint_core::{AccountId, ReceiptId};

use crate::disbursement::Disbursement;

/// Record of one completed withdrawal, kept in the machine's journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub id: ReceiptId,
    pub account_id: AccountId,
    pub amount: u32,
    pub disbursement: Disbursement,
    pub dispensed_at: DateTime<Utc>,
}
