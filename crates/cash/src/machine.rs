use chrono::Utc;
use parking_lot::FairMutex;
use serde::Serialize;

use cashpoint_account::Account;
use cashpoint_core::{DomainError, Entity, MachineId, Money, ReceiptId};

use crate::config::{Denomination, MachineConfig};
use crate::disbursement::Disbursement;
use crate::error::{CashError, UnservableReason};
use crate::inventory::Inventory;
use crate::planner;
use crate::receipt::WithdrawalReceipt;

#[derive(Debug, Default)]
struct MachineState {
    inventory: Inventory,
    receipts: Vec<WithdrawalReceipt>,
}

/// Point-in-time view of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineSnapshot {
    pub id: MachineId,
    pub inventory: Inventory,
}

/// A cash machine.
///
/// All state sits behind one FIFO-fair mutex. `withdraw` holds it for the
/// whole operation and takes the account lock inside it; nothing else in the
/// crate holds both, so the order is always machine → account.
#[derive(Debug)]
pub struct CashMachine {
    id: MachineId,
    config: MachineConfig,
    state: FairMutex<MachineState>,
}

impl CashMachine {
    /// Empty machine with the standard note set and bounds.
    pub fn new(id: MachineId) -> Self {
        Self::with_config(id, MachineConfig::default())
    }

    pub fn with_config(id: MachineId, config: MachineConfig) -> Self {
        Self {
            id,
            config,
            state: FairMutex::new(MachineState::default()),
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Stock `count` notes of `denomination`; returns the new count.
    pub fn add_notes(&self, denomination: Denomination, count: u32) -> Result<u32, CashError> {
        if !self.config.accepts(denomination) {
            return Err(CashError::UnknownDenomination(denomination));
        }

        let mut state = self.state.lock();
        let total = state.inventory.add(denomination, count).ok_or_else(|| {
            DomainError::validation(format!("note count for {denomination} would overflow"))
        })?;

        tracing::debug!(machine_id = %self.id, denomination, count, total, "notes added");
        Ok(total)
    }

    /// Notes of `denomination` on hand (0 if never stocked).
    pub fn check_note_count(&self, denomination: Denomination) -> u32 {
        self.state.lock().inventory.count(denomination)
    }

    /// Account balance rendered for display, e.g. `£1,009,838.59`.
    pub fn format_balance(&self, account: &Account) -> String {
        account
            .check_balance()
            .format_with_symbol(self.config.currency_symbol())
    }

    /// Withdraw `amount` from `account` and return the notes paid out.
    ///
    /// Checks run in a fixed order and the first failure wins: minimum,
    /// maximum, account balance, multiple of the smallest note. The plan is
    /// computed before the account is touched; stock only moves once the
    /// account debit has gone through.
    pub fn withdraw(&self, account: &Account, amount: u32) -> Result<Disbursement, CashError> {
        let mut state = self.state.lock();

        if amount < self.config.min_withdrawal() {
            return Err(CashError::BelowMinimum {
                amount,
                minimum: self.config.min_withdrawal(),
            });
        }
        if amount > self.config.max_withdrawal() {
            return Err(CashError::AboveMaximum {
                amount,
                maximum: self.config.max_withdrawal(),
            });
        }

        let requested = Money::from(amount);
        let available = account.check_balance();
        if requested > available {
            return Err(CashError::InsufficientFunds {
                requested,
                available,
            });
        }

        let smallest = self.config.smallest_denomination();
        if amount % smallest != 0 {
            return Err(CashError::Unservable {
                amount,
                reason: UnservableReason::NotMultipleOfSmallestNote { smallest },
            });
        }

        let plan = planner::plan(amount, &state.inventory, &self.config).map_err(|reason| {
            tracing::warn!(
                machine_id = %self.id,
                account_id = %account.id(),
                amount,
                inventory = %state.inventory,
                %reason,
                "cannot disburse"
            );
            CashError::Unservable { amount, reason }
        })?;

        if let Err(e) = account.withdraw(requested) {
            tracing::warn!(
                machine_id = %self.id,
                amount,
                discarded = %plan,
                error = %e,
                "account debit failed; plan discarded"
            );
            return Err(e.into());
        }

        state.inventory.dispense(&plan);
        state.receipts.push(WithdrawalReceipt {
            id: ReceiptId::new(),
            account_id: account.id().clone(),
            amount,
            disbursement: plan.clone(),
            dispensed_at: Utc::now(),
        });

        tracing::info!(
            machine_id = %self.id,
            account_id = %account.id(),
            amount,
            disbursed = %plan,
            "withdrawal completed"
        );
        Ok(plan)
    }

    /// Σ(denomination × count) currently on hand.
    pub fn total_value(&self) -> u64 {
        self.state.lock().inventory.total_value()
    }

    /// Completed withdrawals, in commit order.
    pub fn receipts(&self) -> Vec<WithdrawalReceipt> {
        self.state.lock().receipts.clone()
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            id: self.id.clone(),
            inventory: self.state.lock().inventory.clone(),
        }
    }
}

impl Entity for CashMachine {
    type Id = MachineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for CashMachine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let snapshot = self.snapshot();
        write!(
            f,
            "CashMachine [id={}, inventory={}]",
            snapshot.id, snapshot.inventory
        )
    }
}
