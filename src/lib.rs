// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Bank Ledger
//!
//! This library models bank accounts that support deposits, withdrawals,
//! transfers and balance/statement queries, backed by an in-memory store.
//!
//! ## Core Components
//!
//! - [`LedgerService`]: Command surface that creates, finds and updates accounts
//! - [`Account`]: Shared account handle with balance and append-only history
//! - [`AccountStore`]: Storage seam; [`InMemoryStore`] is the bundled implementation
//! - [`LedgerEntry`]: Immutable record of one balance-affecting event
//! - [`LedgerError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use bank_ledger_rs::{LedgerError, LedgerService};
//! use rust_decimal_macros::dec;
//!
//! let service = LedgerService::in_memory();
//! let alice = service.create_account("Alice").unwrap();
//! let bob = service.create_account("Bob").unwrap();
//!
//! service.deposit("1", dec!(100.00)).unwrap();
//! service.transfer("1", "2", dec!(40.00)).unwrap();
//!
//! assert_eq!(alice.balance(), dec!(60.00));
//! assert_eq!(bob.balance(), dec!(40.00));
//! assert_eq!(
//!     service.transfer("1", "1", dec!(10.00)),
//!     Err(LedgerError::SameAccountTransfer)
//! );
//! ```
//!
//! ## Thread Safety
//!
//! The ledger is meant for a single caller, but accounts guard their state with
//! a mutex and transfers lock both sides in a fixed order, so sharing a store
//! across threads neither loses updates nor deadlocks.

pub mod account;
mod base;
pub mod entry;
pub mod error;
mod service;
pub mod store;

pub use account::Account;
pub use base::{AccountId, DISPLAY_PRECISION, format_amount};
pub use entry::{Direction, EntryKind, LedgerEntry};
pub use error::LedgerError;
pub use service::LedgerService;
pub use store::{AccountStore, InMemoryStore};
