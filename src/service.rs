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

//! Ledger service.
//!
//! The [`LedgerService`] is the command surface front ends call into. It
//! creates and looks up accounts through an [`AccountStore`] and runs the
//! load → mutate → save cycle for each balance-changing command.
//!
//! # Commands
//!
//! - **Create**: New account with a zero balance; the store mints its identity.
//! - **Deposit**: Credit funds to an account.
//! - **Withdraw**: Debit funds (fails if the balance is too low).
//! - **Transfer**: Move funds between two distinct accounts.
//! - **Balance / Statement**: Read-only queries.

use crate::account::Account;
use crate::base::AccountId;
use crate::store::{AccountStore, InMemoryStore};
use crate::LedgerError;
use rust_decimal::Decimal;
use tracing::debug;

/// Orchestrates an [`AccountStore`] and [`Account`] operations.
///
/// The service holds no state of its own. Errors from the store and from the
/// accounts propagate unchanged.
#[derive(Debug)]
pub struct LedgerService<S = InMemoryStore> {
    store: S,
}

impl LedgerService<InMemoryStore> {
    /// Creates a service backed by an empty [`InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl Default for LedgerService<InMemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: AccountStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and persists an account for `owner`.
    pub fn create_account(&self, owner: &str) -> Result<Account, LedgerError> {
        let account = Account::new(owner);
        let id = self.store.save(&account)?;
        debug!(account = %id, owner, "account created");
        Ok(account)
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] for an unknown identity.
    pub fn find_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.store.load(id)
    }

    /// Returns every account in no particular order.
    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.store.list_all()
    }

    /// Deposits into the account stored under `id` and returns the new balance.
    pub fn deposit(&self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.store.load(id)?;
        account.deposit(amount)?;
        self.store.save(&account)?;

        let balance = account.balance();
        debug!(account = id, %amount, %balance, "deposit applied");
        Ok(balance)
    }

    /// Withdraws from the account stored under `id` and returns the new balance.
    pub fn withdraw(&self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.store.load(id)?;
        account.withdraw(amount)?;
        self.store.save(&account)?;

        let balance = account.balance();
        debug!(account = id, %amount, %balance, "withdrawal applied");
        Ok(balance)
    }

    /// Transfers `amount` from `from` to `to` and saves both accounts.
    ///
    /// The sender is looked up before the receiver, so an unknown sender is
    /// reported even when the receiver is unknown too.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - Either identity is unknown.
    /// - Any error of [`Account::transfer`].
    pub fn transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        let sender = self.store.load(from)?;
        let receiver = self.store.load(to)?;
        sender.transfer(&receiver, amount)?;
        self.store.save(&sender)?;
        self.store.save(&receiver)?;

        debug!(from, to, %amount, "transfer applied");
        Ok(())
    }

    pub fn balance(&self, id: &str) -> Result<Decimal, LedgerError> {
        Ok(self.store.load(id)?.balance())
    }

    pub fn statement(&self, id: &str) -> Result<String, LedgerError> {
        Ok(self.store.load(id)?.statement())
    }

    /// All accounts ordered by numeric identity, for display.
    pub fn sorted_accounts(&self) -> Result<Vec<(AccountId, Account)>, LedgerError> {
        let mut accounts: Vec<_> = self
            .store
            .list_all()?
            .into_iter()
            .filter_map(|account| account.id().map(|id| (id, account)))
            .collect();
        // Minted ids are numeric; anything else sorts last.
        accounts.sort_by_key(|(id, _)| {
            (id.as_str().parse::<u64>().unwrap_or(u64::MAX), id.clone())
        });
        Ok(accounts)
    }
}
