//! Service layer
//!
//! Use-case orchestration above the repositories:
//! - [`catalog`] - product lifecycle behind the plan quota guard
//! - [`payment`] - the transaction ledger and gateway callback
//! - [`notify`] - notification sink

pub mod catalog;
pub mod notify;
pub mod payment;
