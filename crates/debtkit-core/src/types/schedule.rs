//! Payment schedule types for amortizing loans.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// One instalment of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// Period number, starting at 1
    pub period: u32,
    /// Instalment amount (principal + interest, excluding fees)
    pub payment: Money,
    /// Principal repaid in this period
    pub principal: Money,
    /// Interest charged in this period
    pub interest: Money,
    /// Recurring fee charged in this period
    pub fee: Money,
    /// Balance outstanding after this period
    pub balance: Money,
}

impl ScheduledPayment {
    /// Total cash outflow for the period, fees included.
    #[must_use]
    pub fn total_outflow(&self) -> Money {
        self.payment + self.fee
    }
}

impl fmt::Display for ScheduledPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: pay {} (principal {}, interest {}), balance {}",
            self.period, self.payment, self.principal, self.interest, self.balance
        )
    }
}

/// An ordered amortization schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    payments: Vec<ScheduledPayment>,
}

impl PaymentSchedule {
    /// Creates a schedule from payments ordered by period.
    #[must_use]
    pub fn new(payments: Vec<ScheduledPayment>) -> Self {
        Self { payments }
    }

    /// Returns the payments.
    #[must_use]
    pub fn payments(&self) -> &[ScheduledPayment] {
        &self.payments
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Returns true if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Sum of all principal repayments.
    #[must_use]
    pub fn total_principal(&self) -> Money {
        self.payments.iter().map(|p| p.principal).sum()
    }

    /// Sum of all interest charges.
    #[must_use]
    pub fn total_interest(&self) -> Money {
        self.payments.iter().map(|p| p.interest).sum()
    }

    /// Sum of all recurring fees.
    #[must_use]
    pub fn total_fees(&self) -> Money {
        self.payments.iter().map(|p| p.fee).sum()
    }

    /// Balance after the last period, zero for an empty schedule.
    #[must_use]
    pub fn closing_balance(&self) -> Money {
        self.payments.last().map_or(Money::ZERO, |p| p.balance)
    }

    /// Iterates over the payments.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledPayment> {
        self.payments.iter()
    }
}

impl<'a> IntoIterator for &'a PaymentSchedule {
    type Item = &'a ScheduledPayment;
    type IntoIter = std::slice::Iter<'a, ScheduledPayment>;

    fn into_iter(self) -> Self::IntoIter {
        self.payments.iter()
    }
}
