//! Cash machine: note inventory, disbursement planning and the two-phase
//! withdrawal that debits an account and the inventory together.

pub mod config;
pub mod disbursement;
pub mod error;
pub mod inventory;
pub mod machine;
pub mod planner;
pub mod receipt;

pub use config::{Denomination, MachineConfig};
pub use disbursement::Disbursement;
pub use error::{CashError, UnservableReason};
pub use inventory::Inventory;
pub use machine::{CashMachine, MachineSnapshot};
pub use receipt::WithdrawalReceipt;
