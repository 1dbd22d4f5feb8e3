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

use bank_ledger_rs::{LedgerError, LedgerService, format_amount};
use clap::Parser;
use csv::Writer;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Bank Ledger - Manage in-memory bank accounts
///
/// Reads one command per line from standard input (or a script file) and
/// prints the results to stdout. Type `help` for the list of commands.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "An in-memory bank ledger shell", long_about = None)]
struct Args {
    /// Read commands from FILE instead of standard input
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Do not print the prompt
    #[arg(short, long)]
    quiet: bool,
}

const HELP: &str = "\
Commands:
  create <owner>                  Open a new account
  deposit <id> <amount>           Deposit funds
  withdraw <id> <amount>          Withdraw funds
  transfer <from> <to> <amount>   Transfer funds to another account
  balance <id>                    Show the current balance
  statement <id>                  Show the account statement
  list                            List all accounts
  export                          Write all accounts as CSV
  help                            Show this help
  quit                            Leave the shell";

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let service = LedgerService::in_memory();
    let stdout = io::stdout();

    let result = match &args.script {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error opening script '{}': {}", path.display(), e);
                    process::exit(1);
                }
            };
            info!(script = %path.display(), "running script");
            run_session(&service, BufReader::new(file), stdout.lock(), false)
        }
        None => run_session(&service, io::stdin().lock(), stdout.lock(), !args.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`, or `default_level`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Create { owner: String },
    Deposit { id: String, amount: Decimal },
    Withdraw { id: String, amount: Decimal },
    Transfer { from: String, to: String, amount: Decimal },
    Balance { id: String },
    Statement { id: String },
    List,
    Export,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum ParseError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid amount")]
    Amount(String),
}

/// Parses one input line. Returns `Ok(None)` for blank lines.
fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_lowercase().as_str(), args.as_slice()) {
        ("create", [_, ..]) => Command::Create {
            owner: args.join(" "),
        },
        ("create", _) => return Err(ParseError::Usage("create <owner>")),
        ("deposit", [id, amount]) => Command::Deposit {
            id: id.to_string(),
            amount: parse_amount(amount)?,
        },
        ("deposit", _) => return Err(ParseError::Usage("deposit <id> <amount>")),
        ("withdraw", [id, amount]) => Command::Withdraw {
            id: id.to_string(),
            amount: parse_amount(amount)?,
        },
        ("withdraw", _) => return Err(ParseError::Usage("withdraw <id> <amount>")),
        ("transfer", [from, to, amount]) => Command::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount: parse_amount(amount)?,
        },
        ("transfer", _) => return Err(ParseError::Usage("transfer <from> <to> <amount>")),
        ("balance", [id]) => Command::Balance { id: id.to_string() },
        ("balance", _) => return Err(ParseError::Usage("balance <id>")),
        ("statement", [id]) => Command::Statement { id: id.to_string() },
        ("statement", _) => return Err(ParseError::Usage("statement <id>")),
        ("list", []) => Command::List,
        ("list", _) => return Err(ParseError::Usage("list")),
        ("export", []) => Command::Export,
        ("export", _) => return Err(ParseError::Usage("export")),
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(ParseError::Unknown(name.to_string())),
    };

    Ok(Some(command))
}

fn parse_amount(text: &str) -> Result<Decimal, ParseError> {
    text.parse::<Decimal>()
        .map_err(|_| ParseError::Amount(text.to_string()))
}

/// Reads commands from `input` until end of input or `quit`, writing results
/// to `output`.
///
/// Rejected commands are reported and the session continues.
///
/// # Errors
///
/// Returns an I/O error if reading the input or writing the output fails.
fn run_session<R: BufRead, W: Write>(
    service: &LedgerService,
    input: R,
    mut output: W,
    prompt: bool,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(output, "> ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(service, command, &mut output)?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }
    Ok(())
}

/// Runs one command against the ledger and prints its outcome.
fn execute<W: Write>(service: &LedgerService, command: Command, output: &mut W) -> io::Result<()> {
    let result: Result<String, LedgerError> = match command {
        Command::Create { owner } => service.create_account(&owner).map(|account| {
            format!(
                "Account created! Account number: {}, Owner: {}",
                account.id().map(|id| id.to_string()).unwrap_or_default(),
                account.owner()
            )
        }),
        Command::Deposit { id, amount } => service.deposit(&id, amount).map(|balance| {
            format!(
                "Deposited {}. New balance: {}",
                format_amount(amount),
                format_amount(balance)
            )
        }),
        Command::Withdraw { id, amount } => service.withdraw(&id, amount).map(|balance| {
            format!(
                "Withdrew {}. New balance: {}",
                format_amount(amount),
                format_amount(balance)
            )
        }),
        Command::Transfer { from, to, amount } => service
            .transfer(&from, &to, amount)
            .map(|()| format!("Transferred {} to account {}", format_amount(amount), to)),
        Command::Balance { id } => service
            .balance(&id)
            .map(|balance| format!("Current balance: {}", format_amount(balance))),
        Command::Statement { id } => service.statement(&id).map(|s| s.trim_end().to_string()),
        Command::List => list_accounts(service),
        Command::Export => {
            return write_accounts(service, &mut *output).map_err(io::Error::other);
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    };

    match result {
        Ok(text) => writeln!(output, "{}", text),
        Err(e) => {
            warn!(error = %e, "operation rejected");
            writeln!(output, "Error: {}", e)
        }
    }
}

fn list_accounts(service: &LedgerService) -> Result<String, LedgerError> {
    let accounts = service.sorted_accounts()?;
    if accounts.is_empty() {
        return Ok("No accounts".to_string());
    }

    let lines: Vec<String> = accounts
        .iter()
        .map(|(id, account)| {
            format!(
                "Account: {}, Owner: {}, Balance: {}",
                id,
                account.owner(),
                format_amount(account.balance())
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Write all accounts to a CSV writer, ordered by identity.
///
/// # CSV Format
///
/// Columns: `id, owner, balance, entries`
///
/// ```csv
/// id,owner,balance,entries
/// 1,Alice,60.00,2
/// 2,Bob,40.00,1
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_accounts<W: Write>(service: &LedgerService, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    let accounts = service
        .sorted_accounts()
        .map_err(|e| io::Error::other(e.to_string()))?;
    if accounts.is_empty() {
        wtr.write_record(["id", "owner", "balance", "entries"])?;
    }
    for (_, account) in &accounts {
        wtr.serialize(account)?;
    }

    wtr.flush()?;
    Ok(())
}
