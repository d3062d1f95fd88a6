use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

/// Clamp a bounded life stat into its declared range.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// The four core life stats, each bounded 0..=100.
///
/// The bound is enforced at every write site via [`clamp_stat`], not by the
/// type itself.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct CoreStats {
    pub health: i32,
    pub happiness: i32,
    pub smarts: i32,
    pub looks: i32,
}

impl Default for CoreStats {
    fn default() -> Self {
        Self {
            health: 50,
            happiness: 50,
            smarts: 50,
            looks: 50,
        }
    }
}

impl CoreStats {
    pub fn adjust_health(&mut self, delta: i32) {
        self.health = clamp_stat(self.health + delta);
    }

    pub fn adjust_happiness(&mut self, delta: i32) {
        self.happiness = clamp_stat(self.happiness + delta);
    }

    pub fn adjust_smarts(&mut self, delta: i32) {
        self.smarts = clamp_stat(self.smarts + delta);
    }

    pub fn adjust_looks(&mut self, delta: i32) {
        self.looks = clamp_stat(self.looks + delta);
    }
}

/// Public renown, bounded 0..=100.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Fame(pub i32);

/// Liquid money plus accumulated debts.
///
/// Convention: `balance` never goes below zero. A debit that cannot be covered
/// drains the balance to zero and pushes the remainder onto `debts`.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finances {
    pub balance: i64,
    pub debts: i64,
}

impl Finances {
    /// Add money; positive amounts pay down debts first. Zero is a no-op.
    pub fn credit(&mut self, amount: i64) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.debit(-amount);
            return;
        }
        let repay = amount.min(self.debts);
        self.debts -= repay;
        self.balance += amount - repay;
    }

    /// Remove money; any shortfall accrues to `debts`. Zero is a no-op.
    pub fn debit(&mut self, amount: i64) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.credit(-amount);
            return;
        }
        if amount <= self.balance {
            self.balance -= amount;
        } else {
            self.debts += amount - self.balance;
            self.balance = 0;
        }
    }

    /// Apply a signed delta with the balance-floor/debt-overflow convention.
    pub fn apply_delta(&mut self, delta: i64) {
        if delta >= 0 {
            self.credit(delta);
        } else {
            self.debit(-delta);
        }
    }
}

/// Investment holdings owned by the character.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPortfolio {
    pub assets: Vec<Asset>,
}

impl AssetPortfolio {
    pub fn total_value(&self) -> i64 {
        self.assets.iter().map(|asset| asset.value).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Dividend,
    Rental,
}

/// Net worth as seen by achievements and lifestyle scaling.
pub fn net_worth(finances: &Finances, portfolio: &AssetPortfolio) -> i64 {
    finances.balance + portfolio.total_value() - finances.debts
}
