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

//! Core identifier types and amount formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Number of decimal places used when rendering amounts for humans.
///
/// Stored amounts keep their full precision; only text output is rounded.
pub const DISPLAY_PRECISION: u32 = 2;

/// Unique identifier for an account.
///
/// Identities are minted by the store as sequential numbers starting at 1
/// and kept in their textual form, e.g. `"1"`, `"2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<u64> for AccountId {
    fn from(sequence: u64) -> Self {
        Self(sequence.to_string())
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Renders an amount with [`DISPLAY_PRECISION`] decimal places.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.prec$}",
        amount.round_dp(DISPLAY_PRECISION),
        prec = DISPLAY_PRECISION as usize
    )
}
