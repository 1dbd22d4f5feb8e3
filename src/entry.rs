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

//! Ledger entries.
//!
//! A [`LedgerEntry`] records one balance-affecting event on an account. Entries
//! are created by [`Account`](crate::Account) operations, appended to that
//! account's history and never edited afterwards.

use crate::base::{AccountId, format_amount};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Deposit,
    Withdraw,
    Transfer,
}

/// Which way an entry moved the balance.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

/// Immutable record of one balance-affecting event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerEntry {
    kind: EntryKind,
    direction: Direction,
    /// Always positive; the sign comes from `direction`.
    amount: Decimal,
    /// The other side of a transfer.
    counterparty: Option<AccountId>,
    timestamp: DateTime<Utc>,
    description: String,
}

impl LedgerEntry {
    pub(crate) fn deposit(amount: Decimal) -> Self {
        Self::new(
            EntryKind::Deposit,
            Direction::Credit,
            amount,
            None,
            format!("Deposit: +{}", format_amount(amount)),
        )
    }

    pub(crate) fn withdraw(amount: Decimal) -> Self {
        Self::new(
            EntryKind::Withdraw,
            Direction::Debit,
            amount,
            None,
            format!("Withdrawal: -{}", format_amount(amount)),
        )
    }

    /// Outgoing leg of a transfer, recorded on the sender.
    pub(crate) fn transfer_out(to: Option<AccountId>, amount: Decimal) -> Self {
        let description = format!(
            "Transfer to account {}: -{}",
            display_id(to.as_ref()),
            format_amount(amount)
        );
        Self::new(EntryKind::Transfer, Direction::Debit, amount, to, description)
    }

    /// Incoming leg of a transfer, recorded on the receiver.
    pub(crate) fn transfer_in(from: Option<AccountId>, amount: Decimal) -> Self {
        let description = format!(
            "Transfer from account {}: +{}",
            display_id(from.as_ref()),
            format_amount(amount)
        );
        Self::new(EntryKind::Transfer, Direction::Credit, amount, from, description)
    }

    fn new(
        kind: EntryKind,
        direction: Direction,
        amount: Decimal,
        counterparty: Option<AccountId>,
        description: String,
    ) -> Self {
        Self {
            kind,
            direction,
            amount,
            counterparty,
            timestamp: Utc::now(),
            description,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// `+amount` for credits, `-amount` for debits.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }

    pub fn counterparty(&self) -> Option<&AccountId> {
        self.counterparty.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// Unsaved accounts have no identity yet.
fn display_id(id: Option<&AccountId>) -> &str {
    id.map(AccountId::as_str).unwrap_or("-")
}
