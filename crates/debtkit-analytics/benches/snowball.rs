//! Benchmarks for the payoff and amortization calculators.
//!
//! Run with: cargo bench -p debtkit-analytics

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::hint::black_box;

use debtkit_analytics::loans::amortization_schedule;
use debtkit_analytics::payoff::{plan_snowball, Debt, SnowballInput};
use debtkit_analytics::policy::PayoffPolicy;
use debtkit_core::{Frequency, Money, Percent};

fn create_debts(count: usize) -> Vec<Debt> {
    let rates = [dec!(3.5), dec!(4.9), dec!(6.0), dec!(8.25), dec!(11.9), dec!(17.5)];
    (0..count)
        .map(|i| {
            let balance = Decimal::from(5_000 + (i as u64 % 7) * 2_500);
            Debt::new(
                format!("Debt {i}"),
                Money::new(balance),
                Percent::new(rates[i % rates.len()]),
            )
            .with_minimum(Money::new(balance / dec!(50)))
        })
        .collect()
}

fn bench_snowball(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowball");
    let policy = PayoffPolicy::default();

    for size in &[2usize, 10, 50] {
        let debts = create_debts(*size);
        let minimums: Money = debts.iter().map(|d| d.minimum_payment).sum();
        let input = SnowballInput {
            debts,
            monthly_budget: minimums * dec!(1.5),
        };

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| plan_snowball(black_box(input), &policy))
        });
    }
    group.finish();
}

fn bench_amortization(c: &mut Criterion) {
    let mut group = c.benchmark_group("amortization");

    for periods in &[60u32, 360] {
        group.bench_with_input(BenchmarkId::from_parameter(periods), periods, |b, &periods| {
            b.iter(|| {
                amortization_schedule(
                    black_box(Money::new(dec!(250000))),
                    Percent::new(dec!(4.5)),
                    Frequency::Monthly,
                    periods,
                    Money::ZERO,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(payoff, bench_snowball);
criterion_group!(loans, bench_amortization);

criterion_main!(payoff, loans);
