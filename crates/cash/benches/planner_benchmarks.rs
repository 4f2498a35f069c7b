use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cashpoint_account::Account;
use cashpoint_cash::{CashMachine, Inventory, MachineConfig, planner};
use cashpoint_core::{AccountId, MachineId, Money};

fn stocked_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    for (d, c) in [(5, 3000), (10, 1000), (20, 2000), (50, 1000)] {
        inventory.add(d, c);
    }
    inventory
}

/// Pure planning cost per amount (no locks, no account).
fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let config = MachineConfig::default();
    let inventory = stocked_inventory();

    for amount in [20u32, 135, 245, 250] {
        group.bench_with_input(BenchmarkId::from_parameter(amount), &amount, |b, &amount| {
            b.iter(|| planner::plan(black_box(amount), &inventory, &config))
        });
    }

    group.finish();
}

/// Full withdrawal: machine lock, account lock, inventory debit, journal.
fn bench_withdraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("withdraw");

    group.bench_function("withdraw_135", |b| {
        b.iter_batched(
            || {
                let machine = CashMachine::new(MachineId::new("bench").unwrap());
                for (d, c) in [(5, 3000), (10, 1000), (20, 2000), (50, 1000)] {
                    machine.add_notes(d, c).unwrap();
                }
                let account = Account::new(AccountId::new("bench").unwrap());
                account.deposit(Money::from(1_000_000)).unwrap();
                (machine, account)
            },
            |(machine, account)| machine.withdraw(&account, black_box(135)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_plan, bench_withdraw);
criterion_main!(benches);
