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

//! Benchmarks for the ledger.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single deposit / withdrawal / transfer on account handles
//! - Command throughput through the ledger service
//! - Statement rendering over growing histories

use bank_ledger_rs::{Account, AccountStore, InMemoryStore, LedgerService};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

fn amount(units: i64) -> Decimal {
    Decimal::new(units, 2)
}

// =============================================================================
// Account Benchmarks
// =============================================================================

fn bench_single_deposit(c: &mut Criterion) {
    c.bench_function("single_deposit", |b| {
        b.iter(|| {
            let account = Account::new("Alice");
            account.deposit(black_box(amount(10000))).unwrap();
        })
    });
}

fn bench_single_transfer(c: &mut Criterion) {
    c.bench_function("single_transfer", |b| {
        b.iter(|| {
            let store = InMemoryStore::new();
            let alice = Account::new("Alice");
            let bob = Account::new("Bob");
            store.save(&alice).unwrap();
            store.save(&bob).unwrap();
            alice.deposit(amount(10000)).unwrap();
            alice.transfer(&bob, black_box(amount(5000))).unwrap();
        })
    });
}

// =============================================================================
// Service Benchmarks
// =============================================================================

fn bench_service_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("service_mixed");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let service = LedgerService::in_memory();
                service.create_account("Alice").unwrap();
                service.create_account("Bob").unwrap();

                for _ in 0..count {
                    service.deposit("1", amount(10000)).unwrap();
                    let _ = service.withdraw("1", amount(2500));
                    let _ = service.transfer("1", "2", amount(2500));
                }
                black_box(&service);
            })
        });
    }
    group.finish();
}

fn bench_account_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_creation");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let service = LedgerService::in_memory();
                for i in 0..count {
                    service.create_account(&format!("owner-{i}")).unwrap();
                }
                black_box(service.list_accounts().unwrap().len());
            })
        });
    }
    group.finish();
}

// =============================================================================
// Statement Benchmarks
// =============================================================================

fn bench_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement");

    for count in [10, 100, 1_000].iter() {
        let account = Account::new("Alice");
        for _ in 0..*count {
            account.deposit(amount(100)).unwrap();
        }
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(account.statement()))
        });
    }
    group.finish();
}

criterion_group!(accounts, bench_single_deposit, bench_single_transfer,);

criterion_group!(service, bench_service_mixed, bench_account_creation,);

criterion_group!(statements, bench_statement,);

criterion_main!(accounts, service, statements);
