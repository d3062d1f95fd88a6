use bevy_ecs::prelude::*;

use crate::components::career::Employment;
use crate::components::identity::{Age, Player};
use crate::components::stats::{AssetPortfolio, Finances};
use crate::core::rng::SimRng;
use crate::simulation::aging::GameStatus;
use crate::simulation::finance::{tick_finances, MarketState};
use crate::simulation::log::YearLog;

/// System: runs the fiscal year (income, tax, expenses, market walk).
pub fn finance_system(
    status: Res<GameStatus>,
    mut market: ResMut<MarketState>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    mut query: Query<(&mut Finances, &AssetPortfolio, &Employment, &Age), With<Player>>,
) {
    if status.is_over() {
        return;
    }
    let Ok((mut finances, portfolio, employment, age)) = query.get_single_mut() else {
        return;
    };
    tick_finances(
        &mut finances,
        portfolio,
        employment,
        age.0,
        &mut market,
        &mut rng,
        &mut log.0,
    );
}
