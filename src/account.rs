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

//! Account management.
//!
//! An [`Account`] is a shared handle: cloning it yields another view of the
//! same account, so a handle loaded from the store and the handle that was
//! saved observe the same balance and history.
//!
//! Every operation validates before it mutates. A rejected operation leaves
//! the balance and the history exactly as they were.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bank_ledger_rs::{Account, AccountStore, InMemoryStore, LedgerError};
//!
//! let store = InMemoryStore::new();
//! let alice = Account::new("Alice");
//! let bob = Account::new("Bob");
//! store.save(&alice).unwrap();
//! store.save(&bob).unwrap();
//!
//! alice.deposit(dec!(100.00)).unwrap();
//! alice.transfer(&bob, dec!(40.00)).unwrap();
//!
//! assert_eq!(alice.balance(), dec!(60.00));
//! assert_eq!(bob.balance(), dec!(40.00));
//! assert_eq!(alice.withdraw(dec!(500)), Err(LedgerError::InsufficientFunds));
//! ```

use crate::base::{AccountId, format_amount};
use crate::entry::LedgerEntry;
use crate::LedgerError;
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt::Write;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Statement returned for an account without any history.
pub const EMPTY_STATEMENT: &str = "Transaction history is empty";

#[derive(Debug)]
struct AccountData {
    id: Option<AccountId>,
    owner: String,
    balance: Decimal,
    /// Append-only, in chronological order. Grows without bound.
    history: Vec<LedgerEntry>,
}

impl AccountData {
    fn new(owner: String) -> Self {
        Self {
            id: None,
            owner,
            balance: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
        debug_assert_eq!(
            self.balance,
            self.history.iter().map(LedgerEntry::signed_amount).sum::<Decimal>(),
            "Invariant violated: balance differs from the sum of the history"
        );
    }

    /// Increases the balance.
    fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        self.balance = credit(self.balance, amount)?;
        self.history.push(LedgerEntry::deposit(amount));
        self.assert_invariants();
        Ok(())
    }

    /// Decreases the balance.
    fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        if self.balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        self.balance -= amount;
        self.history.push(LedgerEntry::withdraw(amount));
        self.assert_invariants();
        Ok(())
    }

    /// Moves `amount` from `self` to `to`. Both guards are already held.
    fn transfer(&mut self, to: &mut AccountData, amount: Decimal) -> Result<(), LedgerError> {
        // Unsaved accounts share the empty identity.
        if self.id == to.id {
            return Err(LedgerError::SameAccountTransfer);
        }
        if self.balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        let credited = credit(to.balance, amount)?;

        self.balance -= amount;
        to.balance = credited;
        self.history.push(LedgerEntry::transfer_out(to.id.clone(), amount));
        to.history.push(LedgerEntry::transfer_in(self.id.clone(), amount));

        self.assert_invariants();
        to.assert_invariants();
        Ok(())
    }

    fn statement(&self) -> String {
        if self.history.is_empty() {
            return EMPTY_STATEMENT.to_string();
        }

        let mut out = String::from("Account statement:\n");
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Owner: {}", self.owner);
        let _ = writeln!(
            out,
            "Account number: {}",
            self.id.as_ref().map(AccountId::as_str).unwrap_or("-")
        );
        let _ = writeln!(out, "Current balance: {}\n", format_amount(self.balance));
        out.push_str("Transaction history:\n");

        for (i, entry) in self.history.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} [{}]",
                i + 1,
                entry.description(),
                entry.timestamp().format(TIMESTAMP_FORMAT)
            );
        }
        out
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// Adds `amount` to `balance`, rejecting amounts the balance cannot hold.
fn credit(balance: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    balance
        .checked_add(amount)
        .ok_or(LedgerError::InvalidAmount)
}

/// Bank account handle.
#[derive(Debug, Clone)]
pub struct Account {
    inner: Arc<Mutex<AccountData>>,
}

impl Account {
    /// Creates an account with a zero balance, no history and no identity.
    ///
    /// The identity is assigned when the account is first saved to a store.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AccountData::new(owner.into()))),
        }
    }

    pub fn id(&self) -> Option<AccountId> {
        self.inner.lock().id.clone()
    }

    pub fn owner(&self) -> String {
        self.inner.lock().owner.clone()
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Snapshot of the history in chronological order.
    pub fn history(&self) -> Vec<LedgerEntry> {
        self.inner.lock().history.clone()
    }

    /// Returns `true` if both handles refer to the same account.
    pub fn is_same(&self, other: &Account) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative, or the
    ///   balance cannot hold it.
    pub fn deposit(&self, amount: Decimal) -> Result<(), LedgerError> {
        self.inner.lock().deposit(amount)
    }

    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    /// - [`LedgerError::InsufficientFunds`] - `amount` exceeds the balance.
    pub fn withdraw(&self, amount: Decimal) -> Result<(), LedgerError> {
        self.inner.lock().withdraw(amount)
    }

    /// Moves `amount` from this account to `to`.
    ///
    /// Both balances change and both histories gain one entry, or nothing
    /// changes at all. Checks run in this order, so the first failing one
    /// decides the error:
    ///
    /// 1. [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    /// 2. [`LedgerError::SameAccountTransfer`] - `to` is this account, or both
    ///    accounts have the same identity (including none at all).
    /// 3. [`LedgerError::InsufficientFunds`] - `amount` exceeds the balance.
    /// 4. [`LedgerError::InvalidAmount`] - the receiver's balance cannot hold
    ///    `amount`.
    pub fn transfer(&self, to: &Account, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        // The mutex is not reentrant: catch self-transfers before locking twice.
        if self.is_same(to) {
            return Err(LedgerError::SameAccountTransfer);
        }

        let (mut from, mut dest) = self.lock_pair(to);
        from.transfer(&mut dest, amount)
    }

    /// Locks `self` and `other` in address order and returns the guards as
    /// `(self, other)`.
    ///
    /// A fixed global order keeps two opposite transfers from deadlocking.
    fn lock_pair<'a>(
        &'a self,
        other: &'a Account,
    ) -> (MutexGuard<'a, AccountData>, MutexGuard<'a, AccountData>) {
        if Arc::as_ptr(&self.inner) < Arc::as_ptr(&other.inner) {
            let first = self.inner.lock();
            let second = other.inner.lock();
            (first, second)
        } else {
            let first = other.inner.lock();
            let second = self.inner.lock();
            (second, first)
        }
    }

    /// Renders the owner, identity, balance and numbered history.
    ///
    /// Returns [`EMPTY_STATEMENT`] when there is no history.
    pub fn statement(&self) -> String {
        self.inner.lock().statement()
    }

    /// Returns the account identity, assigning one from `mint` first if the
    /// account has none. The lock is held throughout so an identity is minted
    /// at most once per account.
    pub(crate) fn id_or_assign(&self, mint: impl FnOnce() -> AccountId) -> AccountId {
        let mut data = self.inner.lock();
        data.id.get_or_insert_with(mint).clone()
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 4)?;
        state.serialize_field("id", &data.id)?;
        state.serialize_field("owner", &data.owner)?;
        state.serialize_field("balance", &format_amount(data.balance))?;
        state.serialize_field("entries", &data.history.len())?;
        state.end()
    }
}
