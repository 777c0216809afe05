//! Core business logic for the Tally ledger.
//!
//! This crate implements the account/transaction domain:
//! - The operation type registry (purchase, installment purchase,
//!   withdrawal, credit voucher) and its sign policy
//! - Transaction validation
//! - The balance settlement engine (oldest debt retired first)
//! - The ledger service orchestrating validation, account checks,
//!   settlement, and persistence
//! - The `LedgerStore` abstraction over persistence, with an in-memory
//!   implementation for tests

pub mod error;
pub mod operation;
pub mod service;
pub mod settlement;
pub mod store;
pub mod validation;

#[cfg(test)]
mod settlement_props;

pub use error::LedgerError;
pub use operation::OperationType;
pub use service::LedgerService;
pub use settlement::{AppliedOffset, Settlement};
pub use store::{Account, LedgerStore, NewTransaction, StoreError, Transaction, UpdateOutcome};
pub use validation::validate_transaction;
