//! Bank account with a lock-guarded balance.
//!
//! The only mutable state is the balance; everything else about an account is
//! fixed at construction.

pub mod account;

pub use account::{Account, AccountError, AccountSnapshot};
