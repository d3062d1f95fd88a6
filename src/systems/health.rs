use bevy_ecs::prelude::*;

use crate::components::health::ConditionList;
use crate::components::identity::{Age, Player};
use crate::components::stats::{net_worth, AssetPortfolio, CoreStats, Finances};
use crate::core::rng::SimRng;
use crate::simulation::aging::GameStatus;
use crate::simulation::health::tick_health;
use crate::simulation::log::YearLog;

/// System: annual health check and chronic-condition onset.
pub fn health_system(
    status: Res<GameStatus>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    mut query: Query<
        (
            &Age,
            &mut CoreStats,
            &mut ConditionList,
            &Finances,
            &AssetPortfolio,
        ),
        With<Player>,
    >,
) {
    if status.is_over() {
        return;
    }
    let Ok((age, mut stats, mut conditions, finances, portfolio)) = query.get_single_mut() else {
        return;
    };
    let worth = net_worth(finances, portfolio);
    tick_health(age.0, &mut stats, &mut conditions, worth, &mut rng, &mut log.0);
}
