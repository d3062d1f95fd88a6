use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::career::Employment;
use crate::components::stats::{AssetKind, AssetPortfolio, Finances};
use crate::core::rng::SimRng;

/// Marginal tax brackets: (upper bound of the bracket, rate).
const TAX_BRACKETS: &[(i64, f64)] = &[
    (12_000, 0.0),
    (45_000, 0.12),
    (100_000, 0.22),
    (250_000, 0.32),
    (i64::MAX, 0.40),
];

const DIVIDEND_YIELD: f64 = 0.05;
const RENTAL_YIELD: f64 = 0.08;
const LIFESTYLE_CAP: f64 = 2.0;

/// Economy-wide knobs updated by a clamped random walk each year.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct MarketState {
    pub stock_index: f64,
    pub real_estate_index: f64,
    pub inflation: f64,
    pub interest_rate: f64,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            stock_index: 100.0,
            real_estate_index: 100.0,
            inflation: 0.03,
            interest_rate: 0.05,
        }
    }
}

pub fn advance_market(market: &mut MarketState, rng: &mut SimRng) {
    let stock_move = rng.range_i32(-80, 100) as f64 / 1000.0;
    market.stock_index = (market.stock_index * (1.0 + stock_move)).clamp(20.0, 500.0);

    let estate_move = rng.range_i32(-50, 80) as f64 / 1000.0;
    market.real_estate_index =
        (market.real_estate_index * (1.0 + estate_move)).clamp(40.0, 400.0);

    market.inflation = (market.inflation + rng.range_i32(-5, 5) as f64 / 1000.0).clamp(0.0, 0.12);
    market.interest_rate =
        (market.interest_rate + rng.range_i32(-5, 5) as f64 / 1000.0).clamp(0.005, 0.15);
}

/// Progressive marginal income tax.
pub fn income_tax(income: i64) -> i64 {
    if income <= 0 {
        return 0;
    }
    let mut tax = 0.0;
    let mut lower = 0i64;
    for &(upper, rate) in TAX_BRACKETS {
        if income <= lower {
            break;
        }
        let taxable = income.min(upper) - lower;
        tax += taxable as f64 * rate;
        lower = upper;
    }
    tax as i64
}

/// Passive income: 5% on dividend-type assets, 8% on rentals.
pub fn asset_yield(portfolio: &AssetPortfolio) -> i64 {
    portfolio
        .assets
        .iter()
        .map(|asset| {
            let rate = match asset.kind {
                AssetKind::Dividend => DIVIDEND_YIELD,
                AssetKind::Rental => RENTAL_YIELD,
            };
            (asset.value as f64 * rate) as i64
        })
        .sum()
}

/// Cost of living by age band, inflated by lifestyle creep on net worth.
pub fn living_expenses(age: u32, net_worth: i64) -> i64 {
    let base: i64 = match age {
        0..=17 => 1_500,
        18..=25 => 14_000,
        26..=64 => 22_000,
        _ => 18_000,
    };
    let multiplier = (1.0 + (net_worth.max(0) as f64 / 1_000_000.0)).min(LIFESTYLE_CAP);
    (base as f64 * multiplier) as i64
}

/// One fiscal year: salary and yields in, tax and expenses out, interest on
/// any carried debts, then the market moves.
pub fn tick_finances(
    finances: &mut Finances,
    portfolio: &AssetPortfolio,
    employment: &Employment,
    age: u32,
    market: &mut MarketState,
    rng: &mut SimRng,
    log: &mut Vec<String>,
) {
    let salary = employment.job.as_ref().map(|job| job.salary).unwrap_or(0);
    let passive = asset_yield(portfolio);
    let gross = salary + passive;
    let tax = income_tax(gross);

    let net_worth = finances.balance + portfolio.total_value() - finances.debts;
    let expenses = living_expenses(age, net_worth);

    finances.credit(gross);
    finances.debit(tax + expenses);

    if finances.debts > 0 {
        let interest = (finances.debts as f64 * market.interest_rate) as i64;
        if interest > 0 {
            finances.debts += interest;
            log.push(format!("Interest added {} to your debts.", interest));
        }
    }

    if gross > 0 {
        log.push(format!(
            "Earned {} ({} salary, {} investments), paid {} tax and {} expenses.",
            gross, salary, passive, tax, expenses
        ));
    }

    advance_market(market, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::stats::Asset;

    #[test]
    fn tax_is_marginal_not_flat() {
        assert_eq!(income_tax(10_000), 0);
        // 12k free, 33k at 12%.
        assert_eq!(income_tax(45_000), 3_960);
        // plus 15k at 22%.
        assert_eq!(income_tax(60_000), 3_960 + 3_300);
        assert_eq!(income_tax(0), 0);
        assert_eq!(income_tax(-5), 0);
    }

    #[test]
    fn yields_differ_by_asset_kind() {
        let portfolio = AssetPortfolio {
            assets: vec![
                Asset {
                    kind: AssetKind::Dividend,
                    name: "Index fund".to_string(),
                    value: 10_000,
                },
                Asset {
                    kind: AssetKind::Rental,
                    name: "Flat".to_string(),
                    value: 10_000,
                },
            ],
        };
        assert_eq!(asset_yield(&portfolio), 500 + 800);
    }

    #[test]
    fn lifestyle_multiplier_is_capped() {
        let modest = living_expenses(40, 0);
        let rich = living_expenses(40, 50_000_000);
        assert_eq!(rich, modest * 2);
    }

    #[test]
    fn market_walk_respects_clamps() {
        let mut market = MarketState::default();
        let mut rng = SimRng::new(31);
        for _ in 0..500 {
            advance_market(&mut market, &mut rng);
            assert!(market.stock_index >= 20.0 && market.stock_index <= 500.0);
            assert!(market.real_estate_index >= 40.0 && market.real_estate_index <= 400.0);
            assert!(market.inflation >= 0.0 && market.inflation <= 0.12);
            assert!(market.interest_rate >= 0.005 && market.interest_rate <= 0.15);
        }
    }

    #[test]
    fn a_year_with_no_income_still_settles() {
        let mut finances = Finances {
            balance: 500,
            debts: 0,
        };
        let portfolio = AssetPortfolio::default();
        let employment = Employment::default();
        let mut market = MarketState::default();
        let mut rng = SimRng::new(12);
        let mut log = Vec::new();
        // Unemployed, no assets: gross income is zero, only expenses land.
        tick_finances(
            &mut finances,
            &portfolio,
            &employment,
            5,
            &mut market,
            &mut rng,
            &mut log,
        );
        // 1500 of expenses against 500 on hand, plus 5% interest on the
        // uncovered 1000.
        assert_eq!(finances.balance, 0);
        assert_eq!(finances.debts, 1_050);
    }

    #[test]
    fn debts_accrue_interest() {
        let mut finances = Finances {
            balance: 0,
            debts: 10_000,
        };
        let portfolio = AssetPortfolio::default();
        let employment = Employment::default();
        let mut market = MarketState::default();
        let mut rng = SimRng::new(6);
        let mut log = Vec::new();
        let before = finances.debts;
        tick_finances(
            &mut finances,
            &portfolio,
            &employment,
            10,
            &mut market,
            &mut rng,
            &mut log,
        );
        assert!(finances.debts > before);
    }
}
