//! Cash machine error model.

use thiserror::Error;

use cashpoint_account::AccountError;
use cashpoint_core::{DomainError, Money};

use crate::config::Denomination;

/// Why the machine cannot pay out an amount it is otherwise allowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnservableReason {
    /// The amount is not a multiple of the smallest note.
    NotMultipleOfSmallestNote { smallest: Denomination },
    /// An odd-ending amount needs a small note and none is left.
    NoSmallNoteAvailable { smallest: Denomination },
    /// Greedy allocation left an uncovered remainder.
    InventoryShortfall { remaining: u32 },
}

impl core::fmt::Display for UnservableReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotMultipleOfSmallestNote { smallest } => {
                write!(f, "withdrawal must be a multiple of {smallest}")
            }
            Self::NoSmallNoteAvailable { smallest } => write!(f, "no {smallest} note available"),
            Self::InventoryShortfall { remaining } => {
                write!(f, "not enough notes to cover the last {remaining}")
            }
        }
    }
}

/// Failure of a cash machine operation.
///
/// Every variant leaves both the account and the machine exactly as they
/// were before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CashError {
    #[error("minimal withdrawal is {minimum}, requested {amount}")]
    BelowMinimum { amount: u32, minimum: u32 },

    #[error("maximum withdrawal is {maximum}, requested {amount}")]
    AboveMaximum { amount: u32, maximum: u32 },

    #[error("insufficient funds: requested {requested}, balance {available}")]
    InsufficientFunds { requested: Money, available: Money },

    #[error("cannot disburse {amount}: {reason}")]
    Unservable { amount: u32, reason: UnservableReason },

    /// The account refused the debit after validation passed.
    #[error(transparent)]
    Overdrawn(#[from] AccountError),

    #[error("denomination {0} is not accepted by this machine")]
    UnknownDenomination(Denomination),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
