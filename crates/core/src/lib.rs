//! `cashpoint-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the account and
//! the cash machine (no locking, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, MachineId, ReceiptId};
pub use money::Money;
pub use value_object::ValueObject;
