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

//! Account storage.
//!
//! [`AccountStore`] is the seam between the ledger service and wherever
//! accounts live. [`InMemoryStore`] keeps them in a [`DashMap`] and mints
//! sequential identities from an atomic counter.

use crate::account::Account;
use crate::base::AccountId;
use crate::LedgerError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keyed repository of accounts.
pub trait AccountStore {
    /// Stores `account`, assigning it a fresh identity if it has none, and
    /// returns that identity. Saving an account again overwrites its entry.
    fn save(&self, account: &Account) -> Result<AccountId, LedgerError>;

    /// Returns the account stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] if nothing is stored under `id`.
    fn load(&self, id: &str) -> Result<Account, LedgerError>;

    /// Returns every stored account in no particular order.
    fn list_all(&self) -> Result<Vec<Account>, LedgerError>;
}

/// In-memory account store.
///
/// # Invariants
///
/// - Identities are minted sequentially from 1 and never reused.
/// - A loaded account is a handle to the same account that was saved.
#[derive(Debug)]
pub struct InMemoryStore {
    /// Accounts indexed by identity.
    accounts: DashMap<AccountId, Account>,
    /// Next identity to mint.
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty store whose first minted identity is `"1"`.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryStore {
    fn save(&self, account: &Account) -> Result<AccountId, LedgerError> {
        let id = account
            .id_or_assign(|| AccountId::from(self.next_id.fetch_add(1, Ordering::Relaxed)));
        self.accounts.insert(id.clone(), account.clone());
        Ok(id)
    }

    fn load(&self, id: &str) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(LedgerError::AccountNotFound)
    }

    fn list_all(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
