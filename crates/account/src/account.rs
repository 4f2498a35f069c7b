use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Serialize;
use thiserror::Error;

use cashpoint_core::{AccountId, Entity, Money};

/// Account-level rejection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// The debit would take the balance below zero.
    #[error("account {account_id} overdrawn: requested {requested}, available {available}")]
    Overdrawn {
        account_id: AccountId,
        requested: Money,
        available: Money,
    },

    /// The credit would push the balance past the largest representable amount.
    #[error("account {account_id} balance overflow: balance {balance}, deposit {deposit}")]
    BalanceOverflow {
        account_id: AccountId,
        balance: Money,
        deposit: Money,
    },
}

/// Point-in-time view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: Money,
}

/// A bank account.
///
/// The balance sits behind a reader/writer lock: balance checks run side by
/// side, deposits and withdrawals are exclusive. Guards are released with
/// `unlock_fair` so a waiting writer gets the lock before a fresh stream of
/// readers can barge in (and vice versa).
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: RwLock<Money>,
}

impl Account {
    /// Open an account with a zero balance.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: RwLock::new(Money::ZERO),
        }
    }

    /// Current balance.
    pub fn check_balance(&self) -> Money {
        let guard = self.balance.read();
        let balance = *guard;
        RwLockReadGuard::unlock_fair(guard);
        tracing::debug!(account_id = %self.id, %balance, "balance checked");
        balance
    }

    /// Credit `amount` and return the new balance.
    ///
    /// Leaves the balance untouched when the sum would overflow.
    pub fn deposit(&self, amount: Money) -> Result<Money, AccountError> {
        let mut guard = self.balance.write();
        let Some(balance) = guard.checked_add(amount) else {
            let current = *guard;
            RwLockWriteGuard::unlock_fair(guard);
            tracing::warn!(account_id = %self.id, %amount, balance = %current, "deposit refused");
            return Err(AccountError::BalanceOverflow {
                account_id: self.id.clone(),
                balance: current,
                deposit: amount,
            });
        };
        *guard = balance;
        RwLockWriteGuard::unlock_fair(guard);
        tracing::debug!(account_id = %self.id, %amount, %balance, "deposit");
        Ok(balance)
    }

    /// Debit `amount` and return the new balance.
    ///
    /// Leaves the balance untouched when `amount` exceeds it.
    pub fn withdraw(&self, amount: Money) -> Result<Money, AccountError> {
        let mut guard = self.balance.write();
        let Some(balance) = guard.checked_sub(amount) else {
            let available = *guard;
            RwLockWriteGuard::unlock_fair(guard);
            tracing::debug!(account_id = %self.id, %amount, %available, "withdrawal refused");
            return Err(AccountError::Overdrawn {
                account_id: self.id.clone(),
                requested: amount,
                available,
            });
        };
        *guard = balance;
        RwLockWriteGuard::unlock_fair(guard);
        tracing::debug!(account_id = %self.id, %amount, %balance, "withdrawal");
        Ok(balance)
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        let guard = self.balance.read();
        let balance = *guard;
        RwLockReadGuard::unlock_fair(guard);
        AccountSnapshot {
            id: self.id.clone(),
            balance,
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let snapshot = self.snapshot();
        write!(f, "Account [id={}, balance={}]", snapshot.id, snapshot.balance)
    }
}
